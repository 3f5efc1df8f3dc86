//! Configuration loading from recipefinder.toml.

use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Query-service settings.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Query-service settings.
#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Command used to reach the query service.
    #[serde(default = "default_command")]
    pub command: String,

    /// Model requested from the service.
    #[serde(default = "default_model")]
    pub model: String,

    /// Turn cap communicated to the service.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Whether the query service should launch the browser tool server
    /// itself. Disable when a host already provides one.
    #[serde(default = "default_standalone")]
    pub standalone: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            model: default_model(),
            max_turns: default_max_turns(),
            standalone: default_standalone(),
        }
    }
}

fn default_command() -> String {
    runtime::DEFAULT_COMMAND.to_string()
}

fn default_model() -> String {
    runtime::MODEL.to_string()
}

fn default_max_turns() -> u32 {
    runtime::MAX_TURNS
}

fn default_standalone() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.agent.command, runtime::DEFAULT_COMMAND);
        assert_eq!(config.agent.model, runtime::MODEL);
        assert_eq!(config.agent.max_turns, runtime::MAX_TURNS);
        assert!(config.agent.standalone);
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::parse(
            r#"
            [agent]
            model = "sonnet"
            max_turns = 10
            standalone = false
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.model, "sonnet");
        assert_eq!(config.agent.max_turns, 10);
        assert!(!config.agent.standalone);
        assert_eq!(config.agent.command, runtime::DEFAULT_COMMAND);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("[agent\nmodel = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
