//! Import socket (`/ws/import_files`).
//!
//! Outbound frames are `DataBatch` slices written by `net::upload`; inbound
//! frames are rename notices and status reports applied to `IngestState`.

#[cfg(test)]
#[path = "ingest_socket_test.rs"]
mod ingest_socket_test;

#[cfg(any(test, feature = "hydrate"))]
use crate::state::ingest::IngestState;
use crate::state::query_cache::{QueryKey, keys};
#[cfg(any(test, feature = "hydrate"))]
use frames::{FileStatus, IngestFrame};

pub const INGEST_SOCKET_PATH: &str = "/ws/import_files";

/// What one inbound frame did to the drafts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Unparsable, or naming a file this view does not know.
    Dropped,
    Applied,
    /// A file reached `DONE`; cached document lists and labels are stale.
    Stored,
}

/// Apply one inbound text frame to `ingest`.
#[cfg(any(test, feature = "hydrate"))]
pub fn handle_ingest_text(ingest: &mut IngestState, text: &str) -> FrameOutcome {
    let frame = match frames::parse_ingest_frame(text) {
        Ok(frame) => frame,
        Err(e) => {
            leptos::logging::warn!("dropping import frame: {e}");
            return FrameOutcome::Dropped;
        }
    };
    let stored = matches!(&frame, IngestFrame::Status(report) if report.status == FileStatus::Done);
    match (ingest.apply_frame(frame), stored) {
        (false, _) => FrameOutcome::Dropped,
        (true, false) => FrameOutcome::Applied,
        (true, true) => FrameOutcome::Stored,
    }
}

/// Cache prefixes a newly stored document makes stale.
#[must_use]
pub fn stored_document_keys() -> [QueryKey; 2] {
    [keys::documents(), keys::labels()]
}

/// Open the import socket and wire its events into `ingest`.
#[cfg(feature = "hydrate")]
pub fn spawn_ingest_socket(
    ingest: leptos::prelude::RwSignal<IngestState>,
    cache: leptos::prelude::RwSignal<crate::state::query_cache::ResponseCache>,
) -> super::socket::SocketSender {
    use futures::channel::mpsc;
    use leptos::prelude::Update;

    use super::socket::{SocketEnd, SocketSender, page_socket_url, run_text_socket};

    let (tx, rx) = mpsc::unbounded::<String>();
    ingest.update(IngestState::on_socket_connecting);

    leptos::task::spawn_local(async move {
        let url = page_socket_url(INGEST_SOCKET_PATH);
        let end = run_text_socket(
            &url,
            rx,
            || ingest.update(IngestState::on_socket_open),
            |text| {
                let outcome = ingest.try_update(|s| handle_ingest_text(s, &text));
                if outcome == Some(FrameOutcome::Stored) {
                    cache.update(|c| {
                        c.invalidate(&stored_document_keys());
                    });
                }
            },
        )
        .await;
        match end {
            SocketEnd::Released => {
                leptos::logging::log!("import socket released");
                ingest.try_update(IngestState::on_socket_closed);
            }
            SocketEnd::Lost(err) => {
                leptos::logging::warn!("import socket lost: {err}");
                ingest.try_update(IngestState::on_socket_lost);
            }
        }
    });

    SocketSender::new(tx)
}
