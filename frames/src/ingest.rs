//! Ingestion status frames.
//!
//! The import socket sends two kinds of objects: a status report for one
//! file, or a rename notice when the backend forks a client-side file id
//! into a new document (recursively discovered sub-documents, archives).

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FrameError;

/// Lifecycle of one file draft, uppercase on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileStatus {
    /// Selected locally, not yet sent.
    #[default]
    Ready,
    /// Sent, waiting for the backend to pick it up.
    Waiting,
    Starting,
    Loading,
    Chunking,
    Embedding,
    Ingesting,
    Ner,
    Extraction,
    Summarizing,
    Done,
    Error,
}

impl FileStatus {
    /// Statuses that are not advanced by the backend any more.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error | Self::Ready)
    }

    /// Uppercase wire label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Waiting => "WAITING",
            Self::Starting => "STARTING",
            Self::Loading => "LOADING",
            Self::Chunking => "CHUNKING",
            Self::Embedding => "EMBEDDING",
            Self::Ingesting => "INGESTING",
            Self::Ner => "NER",
            Self::Extraction => "EXTRACTION",
            Self::Summarizing => "SUMMARIZING",
            Self::Done => "DONE",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress update for one file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(rename = "fileID")]
    pub file_id: String,
    pub status: FileStatus,
    #[serde(default)]
    pub message: String,
    /// Seconds spent in the stage.
    #[serde(default)]
    pub took: f64,
}

impl StatusReport {
    #[must_use]
    pub fn new(file_id: impl Into<String>, status: FileStatus, message: impl Into<String>, took: f64) -> Self {
        Self { file_id: file_id.into(), status, message: message.into(), took }
    }
}

/// The backend forked `original_file_id` into a new document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameNotice {
    pub original_file_id: String,
    pub new_file_id: String,
    pub filename: String,
}

/// Any inbound frame on the import socket.
#[derive(Clone, Debug, PartialEq)]
pub enum IngestFrame {
    Rename(RenameNotice),
    Status(StatusReport),
}

impl IngestFrame {
    /// Serialize back to the wire object.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, FrameError> {
        let text = match self {
            Self::Rename(notice) => serde_json::to_string(notice)?,
            Self::Status(report) => serde_json::to_string(report)?,
        };
        Ok(text)
    }
}

/// Parse one import-socket frame.
///
/// Rename notices are recognised by `new_file_id`; everything else must be
/// a status report.
///
/// # Errors
///
/// Returns [`FrameError::Json`] for invalid JSON or malformed fields and
/// [`FrameError::UnknownShape`] for objects matching neither shape.
pub fn parse_ingest_frame(text: &str) -> Result<IngestFrame, FrameError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(object) = value.as_object() else {
        return Err(FrameError::UnknownShape);
    };
    if object.contains_key("new_file_id") {
        return Ok(IngestFrame::Rename(serde_json::from_value(value)?));
    }
    if object.contains_key("fileID") && object.contains_key("status") {
        return Ok(IngestFrame::Status(serde_json::from_value(value)?));
    }
    Err(FrameError::UnknownShape)
}
