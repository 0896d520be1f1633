//! File drafts and connection credentials.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::FrameError;
use crate::config::RagConfig;
use crate::ingest::{FileStatus, StatusReport};

/// Where the vector database lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deployment {
    Weaviate,
    Docker,
    #[default]
    Local,
    Custom,
}

impl Deployment {
    pub const ALL: [Self; 4] = [Self::Weaviate, Self::Docker, Self::Local, Self::Custom];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weaviate => "Weaviate",
            Self::Docker => "Docker",
            Self::Local => "Local",
            Self::Custom => "Custom",
        }
    }

    /// Parse a deployment label; unknown labels yield `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(label))
    }
}

/// Credentials sent with every backend request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub deployment: Deployment,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_deployment: Option<String>,
}

/// In-memory record for one file selected for import.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileData {
    #[serde(rename = "fileID")]
    pub file_id: String,
    pub filename: String,
    #[serde(rename = "isURL", default)]
    pub is_url: bool,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub source: String,
    /// Base64-encoded file bytes (empty for URL imports).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub rag_config: RagConfig,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub status_report: BTreeMap<FileStatus, StatusReport>,
}

impl FileData {
    /// Build a draft from raw file bytes. The filename doubles as file id.
    #[must_use]
    pub fn from_bytes(filename: &str, bytes: &[u8], rag_config: RagConfig) -> Self {
        Self {
            file_id: filename.to_owned(),
            filename: filename.to_owned(),
            extension: extension_of(filename),
            content: BASE64.encode(bytes),
            labels: vec!["Document".to_owned()],
            rag_config,
            file_size: bytes.len() as u64,
            ..Self::default()
        }
    }

    /// Build a draft for a URL import; the backend reader fetches the content.
    #[must_use]
    pub fn from_url(url: &str, rag_config: RagConfig) -> Self {
        Self {
            file_id: url.to_owned(),
            filename: url.to_owned(),
            is_url: true,
            source: url.to_owned(),
            labels: vec!["Document".to_owned()],
            rag_config,
            ..Self::default()
        }
    }

    /// Decode the base64 payload.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Base64`] when `content` is not valid base64.
    pub fn content_bytes(&self) -> Result<Vec<u8>, FrameError> {
        Ok(BASE64.decode(self.content.as_bytes())?)
    }

    /// Record a status report and move the file to its status.
    pub fn record(&mut self, report: StatusReport) {
        self.status = report.status;
        self.status_report.insert(report.status, report);
    }

    /// Most recent report message for the current status.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_report.get(&self.status).map(|r| r.message.as_str())
    }
}

/// Lowercase extension without the dot, or empty.
fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
