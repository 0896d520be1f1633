//! Canned answer generation for `/ws/generate_stream`.
//!
//! There is no model behind the mock: the answer quotes the retrieved
//! context and is streamed word by word so clients exercise the same delta
//! accumulation they would against a real generator.

#[cfg(test)]
#[path = "generate_test.rs"]
mod generate_test;

use frames::ChatFrame;

/// Characters of context quoted in an answer.
const QUOTE_CHARS: usize = 280;

/// Answer text for `query` grounded in `context`.
pub fn compose_answer(query: &str, context: &str) -> String {
    let context = context.trim();
    if context.is_empty() {
        return format!("I could not find anything about \"{}\" in the imported documents.", query.trim());
    }
    let quote: String = context.chars().take(QUOTE_CHARS).collect();
    let ellipsis = if context.chars().count() > QUOTE_CHARS { "..." } else { "" };
    format!("Here is what your documents say about \"{}\":\n\n> {quote}{ellipsis}", query.trim())
}

/// Split an answer into streamable pieces that concatenate back to it.
pub fn tokens(answer: &str) -> Vec<&str> {
    answer.split_inclusive(char::is_whitespace).collect()
}

/// Frames for a freshly generated answer: one delta per token, then the stop
/// frame carrying the full text.
pub fn stream_frames(answer: &str) -> Vec<ChatFrame> {
    let mut frames: Vec<ChatFrame> = tokens(answer).into_iter().map(ChatFrame::delta).collect();
    frames.push(ChatFrame::stop(answer));
    frames
}

/// Single stop frame for a semantic-cache hit.
pub fn cached_frame(answer: &str) -> ChatFrame {
    ChatFrame { cached: Some(true), distance: Some(0.0), ..ChatFrame::stop(answer) }
}

/// Stop frame reporting a failure in place of an answer.
pub fn error_frame(message: &str) -> ChatFrame {
    ChatFrame { message: message.to_owned(), ..ChatFrame::stop(message) }
}
