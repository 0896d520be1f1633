//! `import`: push local files (or URLs) through `/ws/import_files` and
//! follow their status reports until every file settles.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use frames::api::{ConnectRequest, ConnectResponse};
use frames::{Credentials, FileData, FileStatus, IngestFrame, RagConfig, UPLOAD_CHUNK_SIZE, split_into_batches};

use crate::CliError;
use crate::rest::RestClient;
use crate::socket;

const IMPORT_PATH: &str = "/ws/import_files";
const REPORT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub paths: Vec<PathBuf>,
    pub urls: Vec<String>,
    pub labels: Vec<String>,
    pub overwrite: bool,
}

/// Per-file status bookkeeping for one import run.
#[derive(Debug, Default)]
pub struct ImportTracker {
    files: BTreeMap<String, Tracked>,
}

#[derive(Debug, Clone, PartialEq)]
struct Tracked {
    filename: String,
    status: FileStatus,
    message: String,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a sent file.
    pub fn watch(&mut self, file_id: &str, filename: &str) {
        self.files.insert(
            file_id.to_owned(),
            Tracked { filename: filename.to_owned(), status: FileStatus::Waiting, message: String::new() },
        );
    }

    /// Apply one inbound frame. Returns a progress line, or `None` when the
    /// frame names a file this run never sent.
    pub fn apply(&mut self, frame: IngestFrame) -> Option<String> {
        match frame {
            IngestFrame::Rename(notice) => {
                if !self.files.contains_key(&notice.original_file_id) {
                    return None;
                }
                self.watch(&notice.new_file_id, &notice.filename);
                Some(format!("{} -> {}", notice.original_file_id, notice.filename))
            }
            IngestFrame::Status(report) => {
                let tracked = self.files.get_mut(&report.file_id)?;
                tracked.status = report.status;
                tracked.message.clone_from(&report.message);
                let took = if report.took > 0.0 { format!(" ({:.1}s)", report.took) } else { String::new() };
                Some(format!("{} {}: {}{took}", tracked.filename, report.status, report.message))
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.files.values().all(|t| t.status.is_terminal())
    }

    /// Files that ended in ERROR, with their last message.
    pub fn failures(&self) -> Vec<(String, String)> {
        self.files
            .values()
            .filter(|t| t.status == FileStatus::Error)
            .map(|t| (t.filename.clone(), t.message.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Build drafts for every path and URL.
pub async fn collect_drafts(options: &ImportOptions, rag_config: &RagConfig) -> Result<Vec<FileData>, CliError> {
    let mut drafts = Vec::with_capacity(options.paths.len() + options.urls.len());
    for path in &options.paths {
        let bytes = tokio::fs::read(path).await?;
        let name = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        drafts.push(FileData::from_bytes(&name, &bytes, rag_config.clone()));
    }
    for url in &options.urls {
        drafts.push(FileData::from_url(url, rag_config.clone()));
    }
    for draft in &mut drafts {
        if !options.labels.is_empty() {
            draft.labels.clone_from(&options.labels);
        }
        draft.overwrite = options.overwrite;
    }
    Ok(drafts)
}

/// Serialized batch frames for one draft.
pub fn upload_frames(file: &FileData, credentials: &Credentials) -> Result<Vec<String>, CliError> {
    let payload = serde_json::to_string(file)?;
    split_into_batches(&payload, &file.file_id, credentials, UPLOAD_CHUNK_SIZE)
        .iter()
        .map(|batch| serde_json::to_string(batch).map_err(CliError::from))
        .collect()
}

pub async fn run(client: &RestClient, options: ImportOptions) -> Result<(), CliError> {
    let connect: ConnectResponse = client
        .post_checked("connect", &ConnectRequest { credentials: client.credentials.clone(), port: client.port.clone() })
        .await?;
    let drafts = collect_drafts(&options, &connect.rag_config).await?;
    if drafts.is_empty() {
        tracing::warn!("nothing to import");
        return Ok(());
    }

    let mut ws = socket::open(&client.socket_url(IMPORT_PATH)?).await?;
    let mut tracker = ImportTracker::new();
    for draft in &drafts {
        let batches = upload_frames(draft, &client.credentials)?;
        tracing::info!(file = %draft.filename, frames = batches.len(), "sending");
        for frame in batches {
            socket::send_text(&mut ws, frame).await?;
        }
        tracker.watch(&draft.file_id, &draft.filename);
    }

    while !tracker.is_settled() {
        let text = socket::recv_text(&mut ws, REPORT_TIMEOUT).await?;
        match frames::parse_ingest_frame(&text) {
            Ok(frame) => {
                if let Some(line) = tracker.apply(frame) {
                    eprintln!("{line}");
                }
            }
            Err(error) => tracing::warn!(%error, "dropping import frame"),
        }
    }

    let failures = tracker.failures();
    for (filename, message) in &failures {
        eprintln!("failed: {filename}: {message}");
    }
    if failures.is_empty() {
        println!("imported {} file(s)", tracker.len());
        Ok(())
    } else {
        Err(CliError::ImportFailed { failed: failures.len() })
    }
}
