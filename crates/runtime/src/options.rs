//! Query-service configuration.
//!
//! Everything here is static data handed to the external agent service:
//! the model, the system prompt, the tool allowlist, and the launch
//! descriptor for the browser tool server. Nothing is enforced locally.

use crate::prompt::SYSTEM_PROMPT;
use serde::Serialize;

/// Model requested from the query service.
pub const MODEL: &str = "haiku";

/// Turn cap communicated to the query service; the only bound on
/// interaction length.
pub const MAX_TURNS: u32 = 50;

/// Registration name of the browser tool server.
pub const TOOL_SERVER_NAME: &str = "chrome-devtools";

/// Chromium path inside the container image. `CHROME_PATH` set to exactly
/// this value is the container signal; anything else means a local browser.
const CONTAINER_CHROME_PATH: &str = "/usr/bin/chromium";

/// Remote tools the agent may call. Names must match what the tool server
/// advertises, including the server-name prefix.
pub const ALLOWED_TOOLS: [&str; 13] = [
    "mcp__chrome-devtools__click",
    "mcp__chrome-devtools__fill",
    "mcp__chrome-devtools__fill_form",
    "mcp__chrome-devtools__hover",
    "mcp__chrome-devtools__press_key",
    "mcp__chrome-devtools__navigate_page",
    "mcp__chrome-devtools__new_page",
    "mcp__chrome-devtools__list_pages",
    "mcp__chrome-devtools__select_page",
    "mcp__chrome-devtools__close_page",
    "mcp__chrome-devtools__wait_for",
    "mcp__chrome-devtools__take_screenshot",
    "mcp__chrome-devtools__take_snapshot",
];

/// Process environment captured once at startup.
///
/// Container detection lives here so the rest of the code takes it as an
/// explicit value instead of reading `env::var` ad hoc.
#[derive(Debug, Clone)]
pub struct Environment {
    vars: Vec<(String, String)>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit key/value pairs.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable in the snapshot.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether we are running inside the container image, where Chromium
    /// sits at a fixed path and must run without a sandbox.
    pub fn is_container(&self) -> bool {
        self.get("CHROME_PATH") == Some(CONTAINER_CHROME_PATH)
    }

    /// All captured variables, for forwarding to the query service.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Launch descriptor for a stdio tool-server child process.
///
/// Serializes to the wire shape the query service expects inside its
/// mcp-config document.
#[derive(Debug, Clone, Serialize)]
pub struct McpServerConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub command: String,
    pub args: Vec<String>,
}

impl McpServerConfig {
    /// The chrome-devtools MCP server, launched through npx.
    pub fn chrome_devtools(environment: &Environment) -> Self {
        Self {
            kind: "stdio",
            command: "npx".to_string(),
            args: chrome_devtools_args(environment.is_container()),
        }
    }
}

fn chrome_devtools_args(container: bool) -> Vec<String> {
    let mut args: Vec<String> = [
        "-y",
        "chrome-devtools-mcp@latest",
        "--headless",
        "--isolated",
        "--no-category-emulation",
        "--no-category-performance",
        "--no-category-network",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if container {
        args.extend(
            [
                "--executable-path=/usr/bin/chromium",
                "--chrome-arg=--no-sandbox",
                "--chrome-arg=--disable-setuid-sandbox",
                "--chrome-arg=--disable-dev-shm-usage",
                "--chrome-arg=--disable-gpu",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
    }

    args
}

/// Options bundle handed to the query service. Immutable once built;
/// rebuilt per call.
#[derive(Debug, Clone)]
pub struct Options {
    pub env: Environment,
    pub system_prompt: String,
    pub model: String,
    pub allowed_tools: Vec<String>,
    pub max_turns: u32,
    /// Present when the query service must launch the tool server itself.
    pub tool_server: Option<McpServerConfig>,
}

impl Options {
    /// Build the bundle. `standalone` embeds the tool-server launch
    /// descriptor; otherwise a host-provided server is assumed.
    pub fn build(environment: &Environment, standalone: bool) -> Self {
        Self {
            env: environment.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            model: MODEL.to_string(),
            allowed_tools: ALLOWED_TOOLS.iter().map(|s| s.to_string()).collect(),
            max_turns: MAX_TURNS,
            tool_server: standalone.then(|| McpServerConfig::chrome_devtools(environment)),
        }
    }
}
