//! Shared wire model for the Verba REST + websocket protocol.
//!
//! This crate owns the JSON shapes exchanged with the backend by both the
//! browser `client`, the `cli`, and the mock `server`. Everything here is
//! pure data plus the small state machines that sit directly on top of the
//! frames: the chat stream accumulator and the chunked-upload splitter and
//! reassembler.
//!
//! Frames are plain JSON text; ordering is whatever the websocket delivers.

pub mod api;
pub mod chat;
pub mod config;
pub mod file;
pub mod ingest;
pub mod upload;

pub use api::ApiResponse;
pub use chat::{ChatFrame, ChatStream, CompletedAnswer, ConversationItem, GeneratePayload, parse_chat_frame};
pub use config::{ConfigSetting, RagComponentClass, RagComponentConfig, RagConfig, TextSetting, Theme, ThemeConfig};
pub use file::{Credentials, Deployment, FileData};
pub use ingest::{FileStatus, IngestFrame, RenameNotice, StatusReport, parse_ingest_frame};
pub use upload::{BatchAssembler, DataBatch, UPLOAD_CHUNK_SIZE, split_into_batches};

/// Error returned when decoding or assembling protocol frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The text was not valid JSON for the expected shape.
    #[error("invalid frame json: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON object matched none of the known frame shapes.
    #[error("unrecognized frame shape")]
    UnknownShape,
    /// File content was not valid base64.
    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),
    /// A batch declared zero chunks.
    #[error("batch for {file_id} declares zero chunks")]
    EmptyBatch { file_id: String },
    /// A batch ordinal is outside `0..total`.
    #[error("chunk order {order} out of range for total {total}")]
    OrderOutOfRange { order: usize, total: usize },
    /// A later batch disagrees with the total announced by an earlier one.
    #[error("chunk total changed from {expected} to {got}")]
    TotalMismatch { expected: usize, got: usize },
    /// The same ordinal arrived twice for one file.
    #[error("duplicate chunk {order} for {file_id}")]
    DuplicateChunk { file_id: String, order: usize },
    /// `isLastChunk` was set on a chunk that is not the final ordinal.
    #[error("chunk {order} flagged last but total is {total}")]
    LastChunkMismatch { order: usize, total: usize },
}
