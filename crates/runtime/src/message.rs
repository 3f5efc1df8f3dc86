//! Wire types for the query-service message stream.
//!
//! Decoding is deliberately permissive: unknown message tags and unknown
//! block kinds land in catch-all variants, and missing usage counters
//! default to zero. The relay treats anything unrecognized as a no-op.

use serde::Deserialize;
use serde_json::Value;

/// A message received from the query service.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryMessage {
    /// Assistant turn carrying content blocks.
    Assistant { message: AssistantMessage },
    /// Terminal result of the session.
    Result {
        #[serde(default)]
        result: Option<String>,
        #[serde(default)]
        usage: Option<Usage>,
    },
    /// Any tag we do not recognize (system, user echo, ...).
    #[serde(other)]
    Other,
}

impl QueryMessage {
    /// Content blocks, when this is an assistant message.
    pub fn content_blocks(&self) -> Option<&[ContentBlock]> {
        match self {
            Self::Assistant { message } => Some(&message.content),
            _ => None,
        }
    }

    /// Usage counters, wherever the message carries them.
    pub fn usage(&self) -> Option<&Usage> {
        match self {
            Self::Assistant { message } => message.usage.as_ref(),
            Self::Result { usage, .. } => usage.as_ref(),
            Self::Other => None,
        }
    }

    /// Final result text, when present and non-empty.
    pub fn result_text(&self) -> Option<&str> {
        match self {
            Self::Result {
                result: Some(text), ..
            } if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Payload of an assistant message.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One block of assistant content.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        name: String,
        /// Arguments are carried on the wire but never surfaced as events.
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

/// Token counters reported by the query service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}
