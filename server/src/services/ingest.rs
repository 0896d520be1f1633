//! Import pipeline run once a file has been fully reassembled.
//!
//! Emits one status report per stage in the order the client expects:
//! STARTING, LOADING, CHUNKING, EMBEDDING, INGESTING, DONE. The first
//! failure ends the run with a single ERROR report.

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use std::time::Instant;

use frames::{FileData, FileStatus, RagConfig, StatusReport};
use tracing::{info, warn};

use super::store::{CHUNK_WORDS, NewDocument, Store, chunk_words};

/// Words per chunk requested by the file's chunker settings.
pub fn chunk_size(config: &RagConfig) -> usize {
    config
        .get("Chunker")
        .and_then(|class| class.selected_component())
        .and_then(|component| component.config.get("Tokens"))
        .and_then(|setting| match &setting.value {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(CHUNK_WORDS)
}

/// Text content of a draft. URL drafts are not fetched; their source is
/// recorded as the only line of content.
fn load_text(file: &FileData) -> Result<String, String> {
    if file.is_url {
        return Ok(format!("Imported from {}", file.source));
    }
    let bytes = file.content_bytes().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|_| format!("{} is not UTF-8 text", file.filename))
}

struct Reporter {
    file_id: String,
    stage_start: Instant,
    reports: Vec<StatusReport>,
}

impl Reporter {
    fn report(&mut self, status: FileStatus, message: String) {
        let took = self.stage_start.elapsed().as_secs_f64();
        self.reports.push(StatusReport::new(self.file_id.clone(), status, message, took));
        self.stage_start = Instant::now();
    }

    fn fail(mut self, message: String) -> Vec<StatusReport> {
        warn!(file_id = %self.file_id, %message, "import failed");
        self.report(FileStatus::Error, message);
        self.reports
    }
}

/// Store `file` and return the status reports of every stage it went through.
pub fn run(store: &mut Store, file: FileData) -> Vec<StatusReport> {
    let started = Instant::now();
    let mut reporter = Reporter { file_id: file.file_id.clone(), stage_start: started, reports: Vec::new() };
    reporter.report(FileStatus::Starting, "Starting Import".to_owned());

    let text = match load_text(&file) {
        Ok(text) => text,
        Err(message) => return reporter.fail(message),
    };
    reporter.report(FileStatus::Loading, format!("Loaded {}", file.filename));

    let size = chunk_size(&file.rag_config);
    let chunks = chunk_words(&text, size).len();
    reporter.report(FileStatus::Chunking, format!("Split {} into {chunks} chunks", file.filename));
    reporter.report(FileStatus::Embedding, format!("Vectorized {chunks} chunks"));

    let doc = NewDocument {
        title: file.filename.clone(),
        extension: file.extension.clone(),
        file_size: file.file_size,
        labels: file.labels.clone(),
        source: file.source.clone(),
        metadata: file.metadata.clone(),
        content: text,
        chunk_size: size,
    };
    let uuid = match store.insert(doc, file.overwrite) {
        Ok((uuid, _)) => uuid,
        Err(error) => return reporter.fail(error.to_string()),
    };
    reporter.report(FileStatus::Ingesting, format!("Imported {} into the store", file.filename));

    let total = started.elapsed().as_secs_f64();
    reporter.report(FileStatus::Done, format!("Import for {} completed successfully", file.filename));
    info!(file_id = %file.file_id, %uuid, chunks, took = total, "import done");
    reporter.reports
}
