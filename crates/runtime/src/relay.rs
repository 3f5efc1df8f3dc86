//! Event relay: query-service messages in, simplified events out.
//!
//! The relay is pull-driven. It suspends awaiting the next upstream
//! message, emits zero or more events for it, and yields control back to
//! the consumer between events. One `Done` terminates every stream that
//! runs to completion; upstream failures surface as stream errors and end
//! the stream without one.

use crate::error::Result;
use crate::message::{ContentBlock, QueryMessage};
use crate::options::{Environment, Options};
use crate::query::QueryClient;
use async_stream::try_stream;
use futures_util::{Stream, StreamExt, pin_mut};
use serde::Serialize;
use std::pin::Pin;

/// Simplified event stream consumed by front ends.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<AgentEvent>> + Send + 'static>>;

/// Events re-emitted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Assistant text chunk.
    Text { text: String },
    /// Tool invocation. Arguments are not surfaced.
    Tool { name: String },
    /// Token counters; counters missing upstream come through as zero.
    Usage { input: u64, output: u64 },
    /// Final session result.
    Result { text: String },
    /// Terminal marker, emitted exactly once after upstream exhaustion.
    Done,
}

/// Run a recipe search and stream simplified events.
///
/// Builds standalone options (the query service launches the browser tool
/// server itself) and opens one query session against the default client.
pub fn stream_agent(prompt: &str) -> Result<EventStream> {
    let environment = Environment::capture();
    let options = Options::build(&environment, true);
    stream_agent_with(prompt, &QueryClient::new(), &options)
}

/// Like [`stream_agent`], with a caller-supplied client and options.
pub fn stream_agent_with(
    prompt: &str,
    client: &QueryClient,
    options: &Options,
) -> Result<EventStream> {
    let messages = client.stream(prompt, options)?;
    Ok(relay(messages))
}

/// Translate an upstream message stream into the simplified event stream.
pub fn relay<S>(upstream: S) -> EventStream
where
    S: Stream<Item = Result<QueryMessage>> + Send + 'static,
{
    Box::pin(try_stream! {
        pin_mut!(upstream);
        while let Some(message) = upstream.next().await {
            let message = message?;
            let events = events_for(&message);
            if events.is_empty() {
                tracing::debug!(?message, "upstream message produced no events");
            }
            for event in events {
                yield event;
            }
        }
        yield AgentEvent::Done;
    })
}

/// Events for a single upstream message, in emission order.
///
/// The four checks are independent; a message may satisfy several. Content
/// blocks get two passes, text first, so all text events for a message
/// precede its tool events.
fn events_for(message: &QueryMessage) -> Vec<AgentEvent> {
    let mut events = Vec::new();

    if let Some(blocks) = message.content_blocks() {
        for block in blocks {
            if let ContentBlock::Text { text } = block
                && !text.is_empty()
            {
                events.push(AgentEvent::Text { text: text.clone() });
            }
        }
        for block in blocks {
            if let ContentBlock::ToolUse { name, .. } = block {
                events.push(AgentEvent::Tool { name: name.clone() });
            }
        }
    }

    if let Some(usage) = message.usage() {
        events.push(AgentEvent::Usage {
            input: usage.input_tokens,
            output: usage.output_tokens,
        });
    }

    if let Some(text) = message.result_text() {
        events.push(AgentEvent::Result {
            text: text.to_string(),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::message::{AssistantMessage, Usage};
    use futures_util::stream;

    fn assistant(content: Vec<ContentBlock>, usage: Option<Usage>) -> QueryMessage {
        QueryMessage::Assistant {
            message: AssistantMessage { content, usage },
        }
    }

    fn text_block(text: &str) -> ContentBlock {
        ContentBlock::Text {
            text: text.to_string(),
        }
    }

    fn tool_block(name: &str) -> ContentBlock {
        ContentBlock::ToolUse {
            id: "call_1".to_string(),
            name: name.to_string(),
            input: serde_json::Value::Null,
        }
    }

    async fn collect(messages: Vec<QueryMessage>) -> Vec<AgentEvent> {
        relay(stream::iter(messages.into_iter().map(Ok)))
            .map(|event| event.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn text_blocks_become_text_events() {
        let events = collect(vec![assistant(
            vec![text_block("Searching..."), text_block("Found 3 results")],
            None,
        )])
        .await;

        assert_eq!(
            events,
            vec![
                AgentEvent::Text {
                    text: "Searching...".to_string()
                },
                AgentEvent::Text {
                    text: "Found 3 results".to_string()
                },
                AgentEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn tool_use_and_usage_from_one_message() {
        let events = collect(vec![assistant(
            vec![tool_block("mcp__chrome-devtools__navigate_page")],
            Some(Usage {
                input_tokens: 12,
                output_tokens: 0,
            }),
        )])
        .await;

        assert_eq!(
            events,
            vec![
                AgentEvent::Tool {
                    name: "mcp__chrome-devtools__navigate_page".to_string()
                },
                AgentEvent::Usage {
                    input: 12,
                    output: 0
                },
                AgentEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn result_message_becomes_result_event() {
        let events = collect(vec![QueryMessage::Result {
            result: Some("Here are 3 recipes...".to_string()),
            usage: None,
        }])
        .await;

        assert_eq!(
            events,
            vec![
                AgentEvent::Result {
                    text: "Here are 3 recipes...".to_string()
                },
                AgentEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn empty_upstream_yields_only_done() {
        assert_eq!(collect(vec![]).await, vec![AgentEvent::Done]);
    }

    #[tokio::test]
    async fn per_message_ordering_is_text_tool_usage() {
        // Blocks arrive interleaved; the two passes still group text first.
        let events = collect(vec![assistant(
            vec![
                tool_block("mcp__chrome-devtools__take_snapshot"),
                text_block("a"),
                tool_block("mcp__chrome-devtools__click"),
                text_block("b"),
            ],
            Some(Usage {
                input_tokens: 1,
                output_tokens: 2,
            }),
        )])
        .await;

        assert_eq!(
            events,
            vec![
                AgentEvent::Text {
                    text: "a".to_string()
                },
                AgentEvent::Text {
                    text: "b".to_string()
                },
                AgentEvent::Tool {
                    name: "mcp__chrome-devtools__take_snapshot".to_string()
                },
                AgentEvent::Tool {
                    name: "mcp__chrome-devtools__click".to_string()
                },
                AgentEvent::Usage {
                    input: 1,
                    output: 2
                },
                AgentEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn cross_message_order_follows_upstream() {
        let events = collect(vec![
            assistant(vec![text_block("first")], None),
            assistant(vec![text_block("second")], None),
        ])
        .await;

        assert_eq!(
            events,
            vec![
                AgentEvent::Text {
                    text: "first".to_string()
                },
                AgentEvent::Text {
                    text: "second".to_string()
                },
                AgentEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn unrecognized_messages_and_empty_text_are_skipped() {
        let events = collect(vec![
            QueryMessage::Other,
            assistant(vec![text_block(""), ContentBlock::Other], None),
            QueryMessage::Result {
                result: None,
                usage: None,
            },
        ])
        .await;

        assert_eq!(events, vec![AgentEvent::Done]);
    }

    #[tokio::test]
    async fn usage_on_result_messages_precedes_result_event() {
        let events = collect(vec![QueryMessage::Result {
            result: Some("done searching".to_string()),
            usage: Some(Usage {
                input_tokens: 100,
                output_tokens: 40,
            }),
        }])
        .await;

        assert_eq!(
            events,
            vec![
                AgentEvent::Usage {
                    input: 100,
                    output: 40
                },
                AgentEvent::Result {
                    text: "done searching".to_string()
                },
                AgentEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn upstream_error_ends_stream_without_done() {
        let upstream = stream::iter(vec![
            Ok(assistant(vec![text_block("partial")], None)),
            Err(Error::Spawn("boom".to_string())),
        ]);

        let collected: Vec<_> = relay(upstream).collect().await;
        assert_eq!(collected.len(), 2);
        assert_eq!(
            *collected[0].as_ref().unwrap(),
            AgentEvent::Text {
                text: "partial".to_string()
            }
        );
        assert!(collected[1].is_err());
    }

    #[test]
    fn events_serialize_with_lowercase_tags() {
        let done = serde_json::to_value(AgentEvent::Done).unwrap();
        assert_eq!(done["type"], "done");

        let usage = serde_json::to_value(AgentEvent::Usage {
            input: 1,
            output: 2,
        })
        .unwrap();
        assert_eq!(usage["type"], "usage");
        assert_eq!(usage["input"], 1);
    }
}
