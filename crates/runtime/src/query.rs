//! Query-service client.
//!
//! Binds the external agent service through its CLI front end: one
//! subprocess per session, stream-json on stdout, one message per line.
//! The agent loop, tool execution, and browser control all happen on the
//! other side of the pipe.

use crate::error::{Error, Result};
use crate::message::QueryMessage;
use crate::options::{McpServerConfig, Options, TOOL_SERVER_NAME};
use async_stream::try_stream;
use futures_util::Stream;
use std::pin::Pin;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

/// Command used to reach the query service unless overridden.
pub const DEFAULT_COMMAND: &str = "claude";

/// Upstream message stream for one query session.
pub type MessageStream = Pin<Box<dyn Stream<Item = Result<QueryMessage>> + Send + 'static>>;

/// Client for the external agent query service.
///
/// Each [`stream`](Self::stream) call owns its own subprocess; sessions are
/// not pooled or reused.
#[derive(Debug, Clone)]
pub struct QueryClient {
    command: String,
}

impl QueryClient {
    /// Client using the default `claude` command.
    pub fn new() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
        }
    }

    /// Client using a custom command path.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Open a query session and stream its messages.
    ///
    /// Spawn failure is an immediate error. A nonzero exit surfaces as the
    /// final stream item after stdout closes; lines that do not decode to a
    /// known message shape are skipped.
    pub fn stream(&self, prompt: &str, options: &Options) -> Result<MessageStream> {
        let mut cmd = self.build_command(prompt, options);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::Spawn(format!("{}: {e}", self.command)))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Spawn("stdout not captured".to_string()))?;
        let stderr = child.stderr.take();

        // Drain stderr from the start; a chatty child must not block on a
        // full pipe while we are still reading stdout.
        let stderr_task = tokio::spawn(async move {
            let mut captured = String::new();
            if let Some(mut err) = stderr {
                let _ = err.read_to_string(&mut captured).await;
            }
            captured
        });

        let stream = try_stream! {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                if let Some(message) = decode_line(&line) {
                    yield message;
                }
            }

            let status = child.wait().await?;
            let captured = stderr_task.await.unwrap_or_default();
            check_status(status, &captured)?;
        };

        Ok(Box::pin(stream))
    }

    fn build_command(&self, prompt: &str, options: &Options) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--print")
            .arg(prompt)
            .arg("--output-format")
            .arg("stream-json")
            .arg("--verbose")
            .arg("--model")
            .arg(&options.model)
            .arg("--max-turns")
            .arg(options.max_turns.to_string())
            .arg("--system-prompt")
            .arg(&options.system_prompt)
            .arg("--allowed-tools")
            .arg(options.allowed_tools.join(","));

        if let Some(server) = &options.tool_server {
            cmd.arg("--mcp-config")
                .arg(mcp_config_json(server))
                .arg("--strict-mcp-config");
        }

        cmd.env_clear();
        for (key, value) in options.env.vars() {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(status: std::process::ExitStatus, stderr: &str) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::Query {
            status,
            stderr: stderr.trim().to_string(),
        })
    }
}

/// The `{"mcpServers": {...}}` document the query service expects.
fn mcp_config_json(server: &McpServerConfig) -> String {
    serde_json::json!({
        "mcpServers": { TOOL_SERVER_NAME: server }
    })
    .to_string()
}

fn decode_line(line: &str) -> Option<QueryMessage> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(message) => Some(message),
        Err(error) => {
            tracing::debug!(%error, line, "skipping undecodable line");
            None
        }
    }
}
