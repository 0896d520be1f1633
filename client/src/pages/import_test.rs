use super::*;
use crate::state::connection::ConnectionStatus;
use frames::{FileData, RagConfig};

fn state_with(names: &[&str]) -> IngestState {
    let mut state = IngestState::default();
    state.add_files(names.iter().map(|n| FileData::from_bytes(n, b"hello", RagConfig::default())));
    state
}

#[test]
fn nothing_to_import_is_a_no_op() {
    let mut state = IngestState::default();
    let outcome = run_import(&mut state, &SocketSender::default(), &Credentials::default(), ImportScope::All);
    assert_eq!(outcome, ImportOutcome::Nothing);
    assert_eq!(state.reconnect_seq, 0);
    assert_eq!(outcome.message(), None);
}

#[test]
fn closed_socket_requests_reconnect_and_keeps_drafts_ready() {
    let mut state = state_with(&["a.md", "b.md"]);
    let outcome = run_import(&mut state, &SocketSender::default(), &Credentials::default(), ImportScope::All);
    assert_eq!(outcome, ImportOutcome::Reconnecting);
    assert_eq!(state.reconnect_seq, 1);
    assert_eq!(state.connection, ConnectionStatus::Connecting);
    assert!(state.files.values().all(|f| f.status == FileStatus::Ready));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn open_status_without_a_live_sender_still_reconnects() {
    let mut state = state_with(&["a.md"]);
    state.on_socket_open();
    let outcome = run_import(&mut state, &SocketSender::default(), &Credentials::default(), ImportScope::Selected);
    assert_eq!(outcome, ImportOutcome::Reconnecting);
    assert_eq!(state.files["a.md"].status, FileStatus::Ready);
}

#[test]
fn outcome_messages() {
    assert_eq!(ImportOutcome::Sent(1).message().as_deref(), Some("Importing 1 file"));
    assert_eq!(ImportOutcome::Sent(3).message().as_deref(), Some("Importing 3 files"));
    assert_eq!(ImportOutcome::Interrupted.message().as_deref(), Some(CONNECTION_INTERRUPTED));
}

#[test]
fn status_summary_counts_each_status() {
    let mut state = state_with(&["a.md", "b.md", "c.md"]);
    state.mark_waiting(&["a.md".to_owned()]);
    assert_eq!(status_summary(&state), "2 READY · 1 WAITING");
}
