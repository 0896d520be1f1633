//! Chunked upload batches.
//!
//! A serialized [`FileData`](crate::FileData) can be megabytes of base64, so
//! the import socket receives it as an ordered series of fixed-size string
//! slices. The sender never waits for acknowledgement; the receiver buffers
//! slices per file id and reassembles by ordinal once all have arrived.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::FrameError;
use crate::file::Credentials;

/// Slice length in characters.
pub const UPLOAD_CHUNK_SIZE: usize = 2000;

/// One slice of a multi-frame upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBatch {
    pub chunk: String,
    #[serde(rename = "isLastChunk")]
    pub is_last_chunk: bool,
    pub total: usize,
    pub order: usize,
    #[serde(rename = "fileID")]
    pub file_id: String,
    #[serde(default)]
    pub credentials: Credentials,
}

/// Split `payload` into `ceil(len / chunk_size)` batches on character
/// boundaries. Exactly the last batch has `is_last_chunk` set. An empty
/// payload still produces one (empty, last) batch so the receiver completes.
#[must_use]
pub fn split_into_batches(
    payload: &str,
    file_id: &str,
    credentials: &Credentials,
    chunk_size: usize,
) -> Vec<DataBatch> {
    let pieces = split_chars(payload, chunk_size.max(1));
    let total = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(order, chunk)| DataBatch {
            chunk: chunk.to_owned(),
            is_last_chunk: order + 1 == total,
            total,
            order,
            file_id: file_id.to_owned(),
            credentials: credentials.clone(),
        })
        .collect()
}

fn split_chars(payload: &str, chunk_size: usize) -> Vec<&str> {
    let mut pieces = Vec::with_capacity(payload.len() / chunk_size + 1);
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in payload.char_indices() {
        if count == chunk_size {
            pieces.push(&payload[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&payload[start..]);
    pieces
}

#[derive(Debug, Default)]
struct PendingUpload {
    total: usize,
    chunks: BTreeMap<usize, String>,
}

/// Receiver-side buffer that reassembles uploads by file id.
#[derive(Debug, Default)]
pub struct BatchAssembler {
    pending: HashMap<String, PendingUpload>,
}

impl BatchAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files with chunks still outstanding.
    #[must_use]
    pub fn pending_files(&self) -> usize {
        self.pending.len()
    }

    /// Buffer one batch. Returns the full payload once every ordinal of the
    /// file has arrived, in any order.
    ///
    /// # Errors
    ///
    /// Rejects zero totals, out-of-range ordinals, a total that differs from
    /// earlier batches of the same file, duplicate ordinals, and a last-chunk
    /// flag on a non-final ordinal. A rejected batch leaves the buffer as it was.
    pub fn add(&mut self, batch: DataBatch) -> Result<Option<String>, FrameError> {
        if batch.total == 0 {
            return Err(FrameError::EmptyBatch { file_id: batch.file_id });
        }
        if batch.order >= batch.total {
            return Err(FrameError::OrderOutOfRange { order: batch.order, total: batch.total });
        }
        if batch.is_last_chunk && batch.order + 1 != batch.total {
            return Err(FrameError::LastChunkMismatch { order: batch.order, total: batch.total });
        }

        let entry = self.pending.entry(batch.file_id.clone()).or_insert_with(|| PendingUpload {
            total: batch.total,
            chunks: BTreeMap::new(),
        });
        if entry.total != batch.total {
            return Err(FrameError::TotalMismatch { expected: entry.total, got: batch.total });
        }
        if entry.chunks.contains_key(&batch.order) {
            return Err(FrameError::DuplicateChunk { file_id: batch.file_id, order: batch.order });
        }
        entry.chunks.insert(batch.order, batch.chunk);
        if entry.chunks.len() < entry.total {
            return Ok(None);
        }

        let done = self.pending.remove(&batch.file_id).unwrap_or_default();
        Ok(Some(done.chunks.into_values().collect()))
    }

    /// Forget a partially received file (its socket went away).
    pub fn abandon(&mut self, file_id: &str) -> bool {
        self.pending.remove(file_id).is_some()
    }
}
