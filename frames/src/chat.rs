//! Chat generation frames and the streaming answer accumulator.
//!
//! The generate socket streams one JSON object per token batch. Non-terminal
//! frames carry a `message` delta (and optionally a `reasoning` delta); the
//! terminal frame has `finish_reason == "stop"` and usually the whole answer
//! in `full_text`.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::FrameError;
use crate::config::RagConfig;

/// Finish reason that marks the terminal frame of one answer.
pub const FINISH_STOP: &str = "stop";

/// One inbound frame on the chat generation socket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatFrame {
    /// Content delta. Some generators name this field `delta`.
    #[serde(default, alias = "delta")]
    pub message: String,
    /// Reasoning delta for models that stream their thinking separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Whole answer, present on the terminal frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// True when the answer was served from the semantic cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    /// Semantic-cache distance. Backends send either a number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_distance", skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl ChatFrame {
    /// Build a non-terminal content delta.
    #[must_use]
    pub fn delta(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }

    /// Build a terminal frame carrying the full answer.
    #[must_use]
    pub fn stop(full_text: impl Into<String>) -> Self {
        Self {
            finish_reason: Some(FINISH_STOP.to_owned()),
            full_text: Some(full_text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.finish_reason.as_deref() == Some(FINISH_STOP)
    }
}

fn deserialize_distance<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid distance: {s}"))),
        Some(other) => Err(D::Error::custom(format!("invalid distance: {other}"))),
    }
}

/// Parse one chat frame from websocket text.
///
/// # Errors
///
/// Returns [`FrameError::Json`] when the text is not a chat frame object.
pub fn parse_chat_frame(text: &str) -> Result<ChatFrame, FrameError> {
    Ok(serde_json::from_str(text)?)
}

/// One prior turn sent along with a generate request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

/// Outbound request on the chat socket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratePayload {
    pub query: String,
    /// Retrieved context the answer should be grounded in.
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub conversation: Vec<ConversationItem>,
    #[serde(default)]
    pub rag_config: RagConfig,
}

/// An answer flushed by a terminal frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedAnswer {
    pub text: String,
    /// Accumulated reasoning, if the model streamed any.
    pub reasoning: Option<String>,
    pub cached: bool,
    pub distance: Option<f64>,
}

/// Accumulates streamed deltas until a terminal frame arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatStream {
    preview: String,
    reasoning: String,
}

impl ChatStream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text received so far for the answer in flight.
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Reasoning received so far for the answer in flight.
    #[must_use]
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        !self.preview.is_empty() || !self.reasoning.is_empty()
    }

    /// Feed one frame. Returns the completed answer on the terminal frame,
    /// after which both accumulators are empty again.
    pub fn apply(&mut self, frame: ChatFrame) -> Option<CompletedAnswer> {
        self.preview.push_str(&frame.message);
        if let Some(reasoning) = frame.reasoning.as_deref() {
            self.reasoning.push_str(reasoning);
        }
        if !frame.is_stop() {
            return None;
        }

        let accumulated = std::mem::take(&mut self.preview);
        let reasoning = std::mem::take(&mut self.reasoning);
        let text = match frame.full_text {
            Some(full) if !full.is_empty() => full,
            _ => accumulated,
        };
        Some(CompletedAnswer {
            text,
            reasoning: (!reasoning.is_empty()).then_some(reasoning),
            cached: frame.cached.unwrap_or(false),
            distance: frame.distance,
        })
    }

    /// Drop any partial answer (the socket went away mid-stream).
    pub fn discard(&mut self) {
        self.preview.clear();
        self.reasoning.clear();
    }
}
