use super::*;

#[test]
fn ui_state_default_has_no_toast() {
    let state = UiState::default();
    assert!(!state.dark_mode);
    assert!(state.toast.is_none());
    assert_eq!(state.toast_seq, 0);
}

#[test]
fn newer_toast_replaces_older() {
    let mut state = UiState::default();
    let first = state.show_status("saved");
    let second = state.show_error("failed");
    assert_ne!(first, second);
    let toast = state.toast.as_ref().expect("toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "failed");
}

#[test]
fn stale_dismiss_keeps_newer_toast() {
    let mut state = UiState::default();
    let first = state.show_status("one");
    let second = state.show_status("two");
    assert!(!state.dismiss(first));
    assert!(state.toast.is_some());
    assert!(state.dismiss(second));
    assert!(state.toast.is_none());
}

#[test]
fn report_routes_results() {
    let mut state = UiState::default();
    state.report(&Ok::<(), String>(()), None);
    assert!(state.toast.is_none());

    state.report(&Ok::<(), String>(()), Some("Config saved"));
    assert_eq!(state.toast.as_ref().map(|t| t.kind), Some(ToastKind::Info));

    state.report(&Err::<(), String>("network down".into()), Some("unused"));
    let toast = state.toast.as_ref().expect("toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "network down");
}
