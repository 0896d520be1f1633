//! Local UI chrome state (theme, status toast).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`chat`,
//! `ingest`, `settings`). Transport and application errors from every view
//! end up here as a one-line toast; nothing is retried automatically.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Severity of a status toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Identifies this toast so a delayed dismiss does not hide a newer one.
    pub seq: u64,
}

/// UI state for the theme toggle and the status toast.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
    pub toast: Option<Toast>,
    pub toast_seq: u64,
}

impl UiState {
    /// Show an informational toast. Returns its sequence number.
    pub fn show_status(&mut self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Info, message.into())
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Error, message.into())
    }

    fn show(&mut self, kind: ToastKind, message: String) -> u64 {
        self.toast_seq += 1;
        self.toast = Some(Toast { kind, message, seq: self.toast_seq });
        self.toast_seq
    }

    /// Hide the toast if it is still the one identified by `seq`.
    pub fn dismiss(&mut self, seq: u64) -> bool {
        if self.toast.as_ref().is_some_and(|t| t.seq == seq) {
            self.toast = None;
            return true;
        }
        false
    }

    /// Toast a `Result` from an API call: errors as errors, successes with
    /// `ok_message` when given.
    pub fn report<T>(&mut self, result: &Result<T, String>, ok_message: Option<&str>) {
        match result {
            Ok(_) => {
                if let Some(msg) = ok_message {
                    self.show_status(msg);
                }
            }
            Err(err) => {
                self.show_error(err.clone());
            }
        }
    }
}
