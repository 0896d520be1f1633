//! REST request and response bodies.
//!
//! DESIGN
//! ======
//! Every endpoint is a `POST` with JSON in and JSON out (except
//! `GET /api/health`). Requests carry [`Credentials`]; responses report
//! application failures in an `error` string inside a 200 body instead of an
//! HTTP status, so response types default every field and expose the error
//! through [`ApiResponse`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{RagConfig, Theme};
use crate::file::Credentials;
use std::collections::BTreeMap;

/// Uniform access to the in-body application error.
pub trait ApiResponse {
    /// Application error message, `None` when empty or absent.
    fn error_message(&self) -> Option<&str>;
}

macro_rules! impl_api_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn error_message(&self) -> Option<&str> {
                    let msg = self.error.trim();
                    (!msg.is_empty()).then_some(msg)
                }
            }
        )*
    };
}

// =============================================================================
// SHARED TYPES
// =============================================================================

/// Per-user preferences stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub getting_started: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { getting_started: true }
    }
}

/// Restricts retrieval to specific documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub title: String,
    pub uuid: String,
}

/// Relevance of one chunk within a retrieved document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkScore {
    pub uuid: String,
    pub score: f64,
    pub chunk_id: u64,
    pub embedder: String,
}

/// A retrieved document with its matching chunks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentScore {
    pub title: String,
    pub uuid: String,
    pub score: f64,
    pub chunks: Vec<ChunkScore>,
}

/// Row in the document explorer list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPreview {
    pub title: String,
    pub uuid: String,
    pub labels: Vec<String>,
}

/// Full document metadata (content is never sent in this shape).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbaDocument {
    pub title: String,
    pub extension: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    pub labels: Vec<String>,
    pub source: String,
    pub meta: Value,
    pub metadata: String,
    pub content: String,
}

/// One page of document content, either raw text or a scored extract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSnippet {
    pub content: String,
    pub chunk_id: u64,
    pub score: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A stored chunk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbaChunk {
    pub uuid: String,
    pub content: String,
    pub chunk_id: u64,
    pub doc_uuid: String,
}

/// Dimensionality-reduced embedding position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorChunk {
    pub vector: Vector3,
    pub uuid: String,
    pub chunk_id: u64,
    pub content: String,
}

/// Chunks of one document, plotted together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorGroup {
    pub name: String,
    pub chunks: Vec<VectorChunk>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorGroups {
    pub embedder: String,
    pub groups: Vec<VectorGroup>,
    pub dimensions: u32,
}

/// A previously asked query offered as autocompletion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    pub query: String,
    pub timestamp: String,
    pub uuid: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    pub status: String,
    pub shards: u32,
    pub version: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePayload {
    pub node_count: u32,
    pub weaviate_version: String,
    pub nodes: Vec<NodeInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionInfo {
    pub name: String,
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPayload {
    pub collection_count: u32,
    pub collections: Vec<CollectionInfo>,
}

/// What `POST /api/reset` wipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResetMode {
    All,
    Documents,
    Config,
    Suggestions,
}

impl ResetMode {
    pub const ALL_MODES: [Self; 4] = [Self::All, Self::Documents, Self::Config, Self::Suggestions];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Documents => "DOCUMENTS",
            Self::Config => "CONFIG",
            Self::Suggestions => "SUGGESTIONS",
        }
    }

    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL_MODES.into_iter().find(|m| m.as_str().eq_ignore_ascii_case(label))
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub credentials: Credentials,
    #[serde(default)]
    pub port: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SetRagConfigRequest {
    pub rag_config: RagConfig,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SetUserConfigRequest {
    pub user_config: UserConfig,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SetThemeConfigRequest {
    pub theme: Theme,
    pub themes: BTreeMap<String, Theme>,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(rename = "RAG")]
    pub rag: RagConfig,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(rename = "documentFilter", default)]
    pub document_filter: Vec<DocumentFilter>,
    pub credentials: Credentials,
}

/// Body of `get_document` and `delete_document`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub uuid: String,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatacountRequest {
    pub embedding_model: String,
    #[serde(rename = "documentFilter", default)]
    pub document_filter: Vec<DocumentFilter>,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub uuid: String,
    /// 1-based page number.
    pub page: u32,
    #[serde(rename = "chunkScores", default)]
    pub chunk_scores: Vec<ChunkScore>,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorsRequest {
    pub uuid: String,
    #[serde(rename = "showAll", default)]
    pub show_all: bool,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunksRequest {
    pub uuid: String,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRequest {
    pub uuid: String,
    pub embedder: String,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocumentsRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    #[serde(rename = "resetMode")]
    pub reset_mode: ResetMode,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsRequest {
    pub query: String,
    pub limit: u32,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllSuggestionsRequest {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub credentials: Credentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSuggestionRequest {
    pub uuid: String,
    pub credentials: Credentials,
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployments {
    #[serde(rename = "WEAVIATE_URL_VERBA")]
    pub weaviate_url: String,
    #[serde(rename = "WEAVIATE_API_KEY_VERBA")]
    pub weaviate_api_key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthResponse {
    pub message: String,
    pub production: String,
    pub gtag: String,
    pub deployments: Deployments,
    pub default_deployment: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectResponse {
    pub connected: bool,
    pub error: String,
    pub rag_config: RagConfig,
    pub user_config: UserConfig,
    pub theme: Theme,
    pub themes: BTreeMap<String, Theme>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfigResponse {
    pub rag_config: RagConfig,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfigResponse {
    pub user_config: UserConfig,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfigResponse {
    pub theme: Option<Theme>,
    pub themes: Option<BTreeMap<String, Theme>>,
    pub error: String,
}

/// Reply of the `set_*` and `delete_suggestion` endpoints. `status` is an
/// integer or a numeric string depending on the code path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub status: Value,
    pub status_msg: String,
}

impl StatusResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self { status: Value::from(200), status_msg: message.into() }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { status: Value::from(400), status_msg: message.into() }
    }

    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match &self.status {
            Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl ApiResponse for StatusResponse {
    fn error_message(&self) -> Option<&str> {
        match self.status_code() {
            Some(200) => None,
            _ if self.status_msg.is_empty() => Some("request failed"),
            _ => Some(self.status_msg.as_str()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    pub error: String,
    pub documents: Vec<DocumentScore>,
    pub context: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsResponse {
    pub documents: Vec<DocumentPreview>,
    pub labels: Vec<String>,
    pub error: String,
    #[serde(rename = "totalDocuments")]
    pub total_documents: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentResponse {
    pub error: String,
    pub document: Option<VerbaDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentResponse {
    pub error: String,
    pub content: Vec<ContentSnippet>,
    #[serde(rename = "maxPage")]
    pub max_page: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunksResponse {
    pub error: String,
    pub chunks: Option<Vec<VerbaChunk>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkResponse {
    pub error: String,
    pub chunk: Option<VerbaChunk>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorsResponse {
    pub error: String,
    pub vector_groups: VectorGroups,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsResponse {
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatacountResponse {
    pub datacount: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllSuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
    pub total_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaResponse {
    pub error: String,
    pub node_payload: NodePayload,
    pub collection_payload: CollectionPayload,
}

impl_api_response!(
    ConnectResponse,
    RagConfigResponse,
    UserConfigResponse,
    ThemeConfigResponse,
    QueryResponse,
    DocumentsResponse,
    DocumentResponse,
    ContentResponse,
    ChunksResponse,
    ChunkResponse,
    VectorsResponse,
    MetaResponse,
);
