//! Chunked upload sender.
//!
//! A draft is serialized to JSON, cut into `UPLOAD_CHUNK_SIZE`-character
//! slices and written to the import socket in a tight loop. There is no
//! acknowledgement or flow control: the socket must stay open for the whole
//! send. If it is not open when a send starts, the send is abandoned and a
//! reconnect is requested instead of queueing.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use frames::{Credentials, FileData, UPLOAD_CHUNK_SIZE, split_into_batches};

use super::socket::SocketSender;
use crate::state::connection::ConnectionStatus;

/// Outcome of one send attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Every frame was queued on the socket.
    Sent { frames: usize },
    /// The socket was not open; nothing was sent.
    NotConnected,
    /// The socket went away part way through.
    Interrupted { sent: usize, total: usize },
}

/// Serialize `file` and split it into wire-ready batch frames.
///
/// # Errors
///
/// Returns an error string if the draft or a batch cannot be serialized.
pub fn prepare_upload(file: &FileData, credentials: &Credentials) -> Result<Vec<String>, String> {
    let payload = serde_json::to_string(file).map_err(|e| e.to_string())?;
    split_into_batches(&payload, &file.file_id, credentials, UPLOAD_CHUNK_SIZE)
        .iter()
        .map(|batch| serde_json::to_string(batch).map_err(|e| e.to_string()))
        .collect()
}

/// Write every batch frame of `file` to `socket`.
///
/// # Errors
///
/// Returns an error string if the draft cannot be serialized.
pub fn send_file(
    socket: &SocketSender,
    status: ConnectionStatus,
    file: &FileData,
    credentials: &Credentials,
) -> Result<SendOutcome, String> {
    if !status.is_open() || !socket.is_attached() {
        return Ok(SendOutcome::NotConnected);
    }
    let frames = prepare_upload(file, credentials)?;
    let total = frames.len();
    for (sent, frame) in frames.into_iter().enumerate() {
        if !socket.send_text(frame) {
            return Ok(SendOutcome::Interrupted { sent, total });
        }
    }
    Ok(SendOutcome::Sent { frames: total })
}
