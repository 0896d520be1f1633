//! WebSocket handlers for answer streaming and file import.
//!
//! DESIGN
//! ======
//! Both sockets speak JSON text frames. Frame handling lives in plain async
//! functions that take the inbound text and return the outbound frames, so
//! tests can drive them without a socket; the upgrade loops only move text.
//!
//! LIFECYCLE
//! =========
//! - `/ws/generate_stream`: each inbound `GeneratePayload` yields a run of
//!   delta frames and one stop frame. The socket stays open for further
//!   questions; a malformed payload is answered with an error stop frame.
//! - `/ws/import_files`: `DataBatch` frames are buffered per file id; once a
//!   file is complete it is ingested and its status reports are sent. Any
//!   malformed frame ends the connection. Demo mode closes immediately.

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;

use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use frames::{BatchAssembler, ChatFrame, DataBatch, FileData, GeneratePayload, IngestFrame, StatusReport};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

use crate::services::{generate, ingest};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ImportFrameError {
    #[error("invalid import frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Frame(#[from] frames::FrameError),
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

// =============================================================================
// GENERATE
// =============================================================================

pub async fn generate_stream(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_generate(socket, state))
}

async fn run_generate(mut socket: WebSocket, state: AppState) {
    let delay = Duration::from_millis(state.config.token_delay_ms);
    info!("ws: generate socket opened");
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                for frame in generate_frames(&state, text.as_str()).await {
                    if !frame.is_stop() && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    if send_json(&mut socket, &frame).await.is_err() {
                        return;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    info!("ws: generate socket closed");
}

/// Frames answering one inbound generate message.
pub(crate) async fn generate_frames(state: &AppState, text: &str) -> Vec<ChatFrame> {
    let payload: GeneratePayload = match serde_json::from_str(text) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "ws: invalid generate payload");
            return vec![generate::error_frame(&format!("Invalid generate payload: {e}"))];
        }
    };
    info!(query = %payload.query, turns = payload.conversation.len(), "ws: generate");

    let mut store = state.store.write().await;
    store.record_suggestion(&payload.query, now_rfc3339());
    if let Some(answer) = store.cached_answer(&payload.query) {
        debug!(query = %payload.query, "ws: semantic cache hit");
        return vec![generate::cached_frame(answer)];
    }
    let answer = generate::compose_answer(&payload.query, &payload.context);
    let frames = generate::stream_frames(&answer);
    store.cache_answer(&payload.query, answer);
    frames
}

// =============================================================================
// IMPORT
// =============================================================================

pub async fn import_files(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_import(socket, state))
}

async fn run_import(mut socket: WebSocket, state: AppState) {
    if state.config.is_demo() {
        warn!("ws: import refused in demo mode");
        let _ = socket.send(Message::Close(None)).await;
        return;
    }

    let mut assembler = BatchAssembler::new();
    while let Some(Ok(msg)) = socket.recv().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let reports = match import_frame(&state, &mut assembler, text.as_str()).await {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "ws: closing import socket");
                break;
            }
        };
        for report in reports {
            let Ok(json) = IngestFrame::Status(report).to_json() else { continue };
            if socket.send(Message::Text(json.into())).await.is_err() {
                return;
            }
        }
    }
    if assembler.pending_files() > 0 {
        warn!(pending = assembler.pending_files(), "ws: import socket closed with partial uploads");
    }
}

/// Buffer one batch frame; once its file is complete, ingest it and return
/// the status reports.
pub(crate) async fn import_frame(
    state: &AppState,
    assembler: &mut BatchAssembler,
    text: &str,
) -> Result<Vec<StatusReport>, ImportFrameError> {
    let batch: DataBatch = serde_json::from_str(text)?;
    debug!(file_id = %batch.file_id, order = batch.order, total = batch.total, "ws: batch");
    let Some(payload) = assembler.add(batch)? else {
        return Ok(Vec::new());
    };
    let file: FileData = serde_json::from_str(&payload)?;
    info!(file_id = %file.file_id, labels = ?file.labels, overwrite = file.overwrite, "ws: file received");
    let mut store = state.store.write().await;
    Ok(ingest::run(&mut store, file))
}

/// Serialize one outbound frame. Unserializable frames are logged and skipped.
fn encode_frame<T: serde::Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(text) => Some(text),
        Err(error) => {
            warn!(%error, "ws: skipping unserializable frame");
            None
        }
    }
}

async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), axum::Error> {
    let Some(text) = encode_frame(value) else {
        return Ok(());
    };
    socket.send(Message::Text(text.into())).await
}
