//! Recipe-finder runtime — query-service configuration and event relay.
//!
//! This crate is a thin adapter over an external agent query service. It
//! assembles the options bundle the service needs (system prompt, model,
//! tool allowlist, turn cap, browser tool-server launch descriptor) and
//! re-emits the service's heterogeneous message stream as five simple
//! event kinds.
//!
//! # Overview
//!
//! - **[`Options`]**: the per-session configuration bundle, built from an
//!   [`Environment`] snapshot.
//! - **[`QueryClient`]**: spawns the agent CLI and decodes its stream-json
//!   output into [`QueryMessage`]s.
//! - **[`relay`]** / **[`stream_agent`]**: translate the message stream
//!   into [`AgentEvent`]s, ending with exactly one [`AgentEvent::Done`].
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use runtime::{AgentEvent, stream_agent};
//!
//! # async fn example() -> runtime::Result<()> {
//! let mut events = stream_agent("find me a lasagna recipe")?;
//! while let Some(event) = events.next().await {
//!     match event? {
//!         AgentEvent::Text { text } => print!("{text}"),
//!         AgentEvent::Done => break,
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod message;
mod options;
mod prompt;
mod query;
mod relay;

pub use error::{Error, Result};
pub use message::{AssistantMessage, ContentBlock, QueryMessage, Usage};
pub use options::{
    ALLOWED_TOOLS, Environment, MAX_TURNS, MODEL, McpServerConfig, Options, TOOL_SERVER_NAME,
};
pub use prompt::SYSTEM_PROMPT;
pub use query::{DEFAULT_COMMAND, MessageStream, QueryClient};
pub use relay::{AgentEvent, EventStream, relay, stream_agent, stream_agent_with};
