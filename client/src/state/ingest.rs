//! Ingestion drafts and their live status.
//!
//! SYSTEM CONTEXT
//! ==============
//! Files chosen on the import page live here until removed or the page
//! reloads. The import socket handler feeds rename and status frames in; the
//! page sends drafts out through the chunked upload sender after marking
//! them `WAITING`.

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use std::collections::BTreeMap;

use frames::{FileData, FileStatus, IngestFrame, RagConfig, StatusReport};

use super::connection::ConnectionStatus;

/// Report message attached to files cut off by a lost import socket.
pub const CONNECTION_INTERRUPTED: &str = "Connection was interrupted";

/// Which drafts an import action sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportScope {
    All,
    Selected,
}

/// State for the import view.
#[derive(Clone, Debug, Default)]
pub struct IngestState {
    pub files: BTreeMap<String, FileData>,
    pub selected: Option<String>,
    pub connection: ConnectionStatus,
    pub reconnect_seq: u64,
}

impl IngestState {
    /// Add drafts keyed by file id. A draft with an existing id replaces the
    /// old one. The first added file becomes the selection if none is set.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileData>) -> usize {
        let mut added = 0;
        for file in files {
            if self.selected.is_none() {
                self.selected = Some(file.file_id.clone());
            }
            self.files.insert(file.file_id.clone(), file);
            added += 1;
        }
        added
    }

    pub fn remove_file(&mut self, file_id: &str) -> bool {
        let removed = self.files.remove(file_id).is_some();
        if self.selected.as_deref() == Some(file_id) {
            self.selected = self.files.keys().next().cloned();
        }
        removed
    }

    pub fn remove_all(&mut self) {
        self.files.clear();
        self.selected = None;
    }

    pub fn select(&mut self, file_id: &str) -> bool {
        if !self.files.contains_key(file_id) {
            return false;
        }
        self.selected = Some(file_id.to_owned());
        true
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&FileData> {
        self.selected.as_deref().and_then(|id| self.files.get(id))
    }

    pub fn add_label(&mut self, file_id: &str, label: &str) -> bool {
        let label = label.trim();
        let Some(file) = self.files.get_mut(file_id) else {
            return false;
        };
        if label.is_empty() || file.labels.iter().any(|l| l == label) {
            return false;
        }
        file.labels.push(label.to_owned());
        true
    }

    pub fn remove_label(&mut self, file_id: &str, label: &str) -> bool {
        let Some(file) = self.files.get_mut(file_id) else {
            return false;
        };
        let before = file.labels.len();
        file.labels.retain(|l| l != label);
        file.labels.len() != before
    }

    pub fn set_labels(&mut self, file_id: &str, labels: Vec<String>) -> bool {
        let Some(file) = self.files.get_mut(file_id) else {
            return false;
        };
        file.labels = labels;
        true
    }

    pub fn set_overwrite(&mut self, file_id: &str, overwrite: bool) -> bool {
        let Some(file) = self.files.get_mut(file_id) else {
            return false;
        };
        file.overwrite = overwrite;
        true
    }

    pub fn set_file_rag_config(&mut self, file_id: &str, rag_config: RagConfig) -> bool {
        let Some(file) = self.files.get_mut(file_id) else {
            return false;
        };
        file.rag_config = rag_config;
        true
    }

    /// Copy one pipeline configuration onto every draft that has not been sent.
    pub fn apply_rag_config_to_all(&mut self, rag_config: &RagConfig) {
        for file in self.files.values_mut().filter(|f| importable(f.status)) {
            file.rag_config = rag_config.clone();
        }
    }

    /// File ids an import action should send: drafts that are not in flight
    /// and not already done.
    #[must_use]
    pub fn selected_for_import(&self, scope: ImportScope) -> Vec<String> {
        match scope {
            ImportScope::All => self
                .files
                .values()
                .filter(|f| importable(f.status))
                .map(|f| f.file_id.clone())
                .collect(),
            ImportScope::Selected => self
                .selected_file()
                .filter(|f| importable(f.status))
                .map(|f| vec![f.file_id.clone()])
                .unwrap_or_default(),
        }
    }

    /// Move drafts to `WAITING` just before they are sent, dropping reports
    /// from an earlier attempt.
    pub fn mark_waiting(&mut self, file_ids: &[String]) {
        for id in file_ids {
            if let Some(file) = self.files.get_mut(id) {
                file.status = FileStatus::Waiting;
                file.status_report.clear();
            }
        }
    }

    /// Apply one import-socket frame. Returns `false` when the frame names an
    /// unknown file id.
    pub fn apply_frame(&mut self, frame: IngestFrame) -> bool {
        match frame {
            IngestFrame::Rename(notice) => {
                let Some(original) = self.files.get(&notice.original_file_id) else {
                    return false;
                };
                let forked = FileData {
                    file_id: notice.new_file_id.clone(),
                    filename: notice.filename,
                    ..original.clone()
                };
                self.files.insert(notice.new_file_id, forked);
                true
            }
            IngestFrame::Status(report) => {
                let Some(file) = self.files.get_mut(&report.file_id) else {
                    return false;
                };
                file.record(report);
                true
            }
        }
    }

    pub fn on_socket_connecting(&mut self) {
        self.connection = ConnectionStatus::Connecting;
    }

    pub fn on_socket_open(&mut self) {
        self.connection = ConnectionStatus::Open;
    }

    /// Socket error or unexpected close: every file still in flight fails
    /// with a synthetic report.
    pub fn on_socket_lost(&mut self) {
        self.connection = ConnectionStatus::Error;
        self.interrupt_in_flight();
    }

    /// The view released its socket. The backend drops partial uploads with
    /// it, so files in flight fail the same way as on a lost socket.
    pub fn on_socket_closed(&mut self) {
        self.connection = ConnectionStatus::Closed;
        self.interrupt_in_flight();
    }

    fn interrupt_in_flight(&mut self) {
        for file in self.files.values_mut().filter(|f| !f.status.is_terminal()) {
            let report = StatusReport::new(file.file_id.clone(), FileStatus::Error, CONNECTION_INTERRUPTED, 0.0);
            file.record(report);
        }
    }

    pub fn request_reconnect(&mut self) {
        self.reconnect_seq += 1;
        self.connection = ConnectionStatus::Connecting;
    }

    /// Count of drafts per status, for the page header.
    #[must_use]
    pub fn status_counts(&self) -> BTreeMap<FileStatus, usize> {
        let mut counts = BTreeMap::new();
        for file in self.files.values() {
            *counts.entry(file.status).or_insert(0) += 1;
        }
        counts
    }
}

fn importable(status: FileStatus) -> bool {
    matches!(status, FileStatus::Ready | FileStatus::Error)
}
