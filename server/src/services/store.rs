//! In-memory document store backing the mock API.
//!
//! DESIGN
//! ======
//! Documents are split into word-window chunks at ingest time. Each chunk
//! gets a deterministic pseudo-embedding (three coordinates derived from a
//! hash of its text) so the vector view has something stable to plot.
//! Retrieval scores chunks by query-term overlap; it is a stand-in for the
//! vector search of a real deployment, not an approximation of it.
//!
//! Configs, themes and suggestions live here too so `reset` can wipe any
//! subset of them in one place.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{DefaultHasher, Hash, Hasher};

use frames::api::{
    ChunkScore, CollectionInfo, CollectionPayload, ContentSnippet, DocumentPreview, DocumentScore, NodeInfo,
    NodePayload, ResetMode, Suggestion, UserConfig, Vector3, VectorChunk, VectorGroup, VectorGroups, VerbaChunk,
    VerbaDocument,
};
use frames::{ConfigSetting, RagComponentClass, RagComponentConfig, RagConfig, Theme, ThemeConfig};
use serde_json::{Value, json};
use uuid::Uuid;

/// Words per chunk.
pub const CHUNK_WORDS: usize = 64;
/// Characters per page of raw document content.
pub const CONTENT_PAGE_CHARS: usize = 10_000;
/// Chunks returned by one retrieval.
pub const RETRIEVE_LIMIT: usize = 6;
pub const EMBEDDER: &str = "MockEmbedder";

#[derive(Debug, Clone)]
pub struct StoredChunk {
    pub uuid: String,
    pub chunk_id: u64,
    pub content: String,
    pub vector: Vector3,
}

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub uuid: String,
    pub title: String,
    pub extension: String,
    pub file_size: u64,
    pub labels: Vec<String>,
    pub source: String,
    pub metadata: String,
    pub content: String,
    pub chunks: Vec<StoredChunk>,
}

/// Fields of an incoming document; chunks are derived from `content`.
#[derive(Debug, Clone, Default)]
pub struct NewDocument {
    pub title: String,
    pub extension: String,
    pub file_size: u64,
    pub labels: Vec<String>,
    pub source: String,
    pub metadata: String,
    pub content: String,
    /// Words per chunk; zero selects [`CHUNK_WORDS`].
    pub chunk_size: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} already exists; enable overwrite to replace it")]
    Duplicate(String),
    #[error("document has no text content")]
    Empty,
}

pub struct Store {
    documents: BTreeMap<String, StoredDocument>,
    suggestions: Vec<Suggestion>,
    /// Answers keyed by normalized query, served as semantic-cache hits.
    answers: HashMap<String, String>,
    pub rag_config: RagConfig,
    pub user_config: UserConfig,
    pub theme_config: ThemeConfig,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
            suggestions: Vec::new(),
            answers: HashMap::new(),
            rag_config: default_rag_config(),
            user_config: UserConfig::default(),
            theme_config: default_theme_config(),
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn find_by_title(&self, title: &str) -> Option<&str> {
        self.documents.values().find(|d| d.title == title).map(|d| d.uuid.as_str())
    }

    /// Chunk, embed and store a document. Returns its uuid and chunk count.
    ///
    /// # Errors
    ///
    /// Rejects empty content and, unless `overwrite` is set, a title that is
    /// already stored.
    pub fn insert(&mut self, doc: NewDocument, overwrite: bool) -> Result<(String, usize), StoreError> {
        if doc.content.trim().is_empty() {
            return Err(StoreError::Empty);
        }
        if let Some(existing) = self.find_by_title(&doc.title).map(str::to_owned) {
            if !overwrite {
                return Err(StoreError::Duplicate(doc.title));
            }
            self.documents.remove(&existing);
        }

        let uuid = Uuid::new_v4().to_string();
        let size = if doc.chunk_size == 0 { CHUNK_WORDS } else { doc.chunk_size };
        let chunks: Vec<StoredChunk> = chunk_words(&doc.content, size)
            .into_iter()
            .enumerate()
            .map(|(idx, content)| StoredChunk {
                uuid: Uuid::new_v4().to_string(),
                chunk_id: idx as u64,
                vector: pseudo_vector(&content),
                content,
            })
            .collect();
        let count = chunks.len();
        self.answers.clear();
        self.documents.insert(
            uuid.clone(),
            StoredDocument {
                uuid: uuid.clone(),
                title: doc.title,
                extension: doc.extension,
                file_size: doc.file_size,
                labels: doc.labels,
                source: doc.source,
                metadata: doc.metadata,
                content: doc.content,
                chunks,
            },
        );
        Ok((uuid, count))
    }

    pub fn delete(&mut self, uuid: &str) -> bool {
        let removed = self.documents.remove(uuid).is_some();
        if removed {
            self.answers.clear();
        }
        removed
    }

    /// Title search plus label filter, paged (1-based). Returns the page and
    /// the total number of matches.
    pub fn search(&self, query: &str, labels: &[String], page: u32, page_size: u32) -> (Vec<DocumentPreview>, u64) {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<&StoredDocument> = self
            .documents
            .values()
            .filter(|d| needle.is_empty() || d.title.to_lowercase().contains(&needle))
            .filter(|d| labels.iter().all(|l| d.labels.contains(l)))
            .collect();
        matches.sort_by(|a, b| a.title.cmp(&b.title));
        let total = matches.len() as u64;
        let previews = page_slice(&matches, page, page_size)
            .iter()
            .map(|d| DocumentPreview { title: d.title.clone(), uuid: d.uuid.clone(), labels: d.labels.clone() })
            .collect();
        (previews, total)
    }

    pub fn labels(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.documents.values().flat_map(|d| d.labels.iter()).collect();
        set.into_iter().cloned().collect()
    }

    /// Document metadata without its content.
    pub fn document(&self, uuid: &str) -> Option<VerbaDocument> {
        let doc = self.documents.get(uuid)?;
        Some(VerbaDocument {
            title: doc.title.clone(),
            extension: doc.extension.clone(),
            file_size: doc.file_size,
            labels: doc.labels.clone(),
            source: doc.source.clone(),
            meta: json!({ "chunks": doc.chunks.len() }),
            metadata: doc.metadata.clone(),
            content: String::new(),
        })
    }

    /// One page of content. With chunk scores, pages run over the scored
    /// chunks (one extract per page); otherwise over raw text.
    pub fn content(&self, uuid: &str, page: u32, chunk_scores: &[ChunkScore]) -> Option<(Vec<ContentSnippet>, u32)> {
        let doc = self.documents.get(uuid)?;
        let scored: Vec<&ChunkScore> = chunk_scores.iter().filter(|s| doc.chunks.iter().any(|c| c.uuid == s.uuid)).collect();
        if !scored.is_empty() {
            let index = page_index(page).min(scored.len() - 1);
            let score = scored[index];
            let content = doc.chunks.iter().find(|c| c.uuid == score.uuid).map(|c| c.content.clone()).unwrap_or_default();
            let snippet = ContentSnippet { content, chunk_id: score.chunk_id, score: score.score, kind: "extract".to_owned() };
            return Some((vec![snippet], page_count(scored.len())));
        }

        let pages = chunk_chars(&doc.content, CONTENT_PAGE_CHARS);
        let index = page_index(page).min(pages.len().saturating_sub(1));
        let content = pages.get(index).map(|p| (*p).to_owned()).unwrap_or_default();
        let snippet = ContentSnippet { content, chunk_id: 0, score: 0.0, kind: "text".to_owned() };
        Some((vec![snippet], page_count(pages.len())))
    }

    pub fn chunks(&self, uuid: &str, page: u32, page_size: u32) -> Option<Vec<VerbaChunk>> {
        let doc = self.documents.get(uuid)?;
        let chunks = page_slice(&doc.chunks, page, page_size).iter().map(|c| to_verba_chunk(doc, c)).collect();
        Some(chunks)
    }

    pub fn chunk(&self, uuid: &str) -> Option<VerbaChunk> {
        self.documents
            .values()
            .find_map(|doc| doc.chunks.iter().find(|c| c.uuid == uuid).map(|c| to_verba_chunk(doc, c)))
    }

    /// Vector groups for one document, or for every document when `show_all`.
    pub fn vectors(&self, uuid: &str, show_all: bool) -> Option<VectorGroups> {
        if !self.documents.contains_key(uuid) {
            return None;
        }
        let groups = self
            .documents
            .values()
            .filter(|d| show_all || d.uuid == uuid)
            .map(|d| VectorGroup {
                name: d.title.clone(),
                chunks: d
                    .chunks
                    .iter()
                    .map(|c| VectorChunk {
                        vector: c.vector,
                        uuid: c.uuid.clone(),
                        chunk_id: c.chunk_id,
                        content: c.content.clone(),
                    })
                    .collect(),
            })
            .collect();
        Some(VectorGroups { embedder: EMBEDDER.to_owned(), groups, dimensions: 3 })
    }

    /// Score chunks against the query and return the best documents plus
    /// the concatenated context of the chosen chunks.
    pub fn retrieve(&self, query: &str, labels: &[String], filter: &[String]) -> (Vec<DocumentScore>, String) {
        let terms = query_terms(query);
        let mut hits: Vec<(&StoredDocument, &StoredChunk, f64)> = self
            .documents
            .values()
            .filter(|d| labels.iter().all(|l| d.labels.contains(l)))
            .filter(|d| filter.is_empty() || filter.contains(&d.uuid))
            .flat_map(|d| d.chunks.iter().map(move |c| (d, c)))
            .filter_map(|(d, c)| {
                let score = overlap_score(&terms, &c.content);
                (score > 0.0).then_some((d, c, score))
            })
            .collect();
        hits.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.1.chunk_id.cmp(&b.1.chunk_id)));
        hits.truncate(RETRIEVE_LIMIT);

        let mut documents: Vec<DocumentScore> = Vec::new();
        let mut context = String::new();
        for (doc, chunk, score) in hits {
            let chunk_score =
                ChunkScore { uuid: chunk.uuid.clone(), score, chunk_id: chunk.chunk_id, embedder: EMBEDDER.to_owned() };
            match documents.iter_mut().find(|d| d.uuid == doc.uuid) {
                Some(entry) => {
                    entry.score += score;
                    entry.chunks.push(chunk_score);
                }
                None => documents.push(DocumentScore {
                    title: doc.title.clone(),
                    uuid: doc.uuid.clone(),
                    score,
                    chunks: vec![chunk_score],
                }),
            }
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&chunk.content);
        }
        documents.sort_by(|a, b| b.score.total_cmp(&a.score));
        (documents, context)
    }

    /// Number of documents, restricted to `filter` uuids when non-empty.
    pub fn datacount(&self, filter: &[String]) -> u64 {
        self.documents.keys().filter(|uuid| filter.is_empty() || filter.contains(uuid)).count() as u64
    }

    /// Remember an asked query. Repeated queries are stored once.
    pub fn record_suggestion(&mut self, query: &str, timestamp: String) {
        let query = query.trim();
        if query.is_empty() || self.suggestions.iter().any(|s| s.query.eq_ignore_ascii_case(query)) {
            return;
        }
        self.suggestions.push(Suggestion { query: query.to_owned(), timestamp, uuid: Uuid::new_v4().to_string() });
    }

    /// Stored queries containing `query`, newest first.
    pub fn suggestions(&self, query: &str, limit: u32) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.suggestions
            .iter()
            .rev()
            .filter(|s| s.query.to_lowercase().contains(&needle))
            .take(limit as usize)
            .cloned()
            .collect()
    }

    pub fn all_suggestions(&self, page: u32, page_size: u32) -> (Vec<Suggestion>, u64) {
        let newest_first: Vec<Suggestion> = self.suggestions.iter().rev().cloned().collect();
        (page_slice(&newest_first, page, page_size).to_vec(), newest_first.len() as u64)
    }

    pub fn delete_suggestion(&mut self, uuid: &str) -> bool {
        let before = self.suggestions.len();
        self.suggestions.retain(|s| s.uuid != uuid);
        before != self.suggestions.len()
    }

    pub fn cached_answer(&self, query: &str) -> Option<&str> {
        self.answers.get(&normalize(query)).map(String::as_str)
    }

    pub fn cache_answer(&mut self, query: &str, answer: String) {
        self.answers.insert(normalize(query), answer);
    }

    pub fn reset(&mut self, mode: ResetMode) {
        match mode {
            ResetMode::All => *self = Self::new(),
            ResetMode::Documents => {
                self.documents.clear();
                self.answers.clear();
            }
            ResetMode::Config => {
                self.rag_config = default_rag_config();
                self.user_config = UserConfig::default();
                self.theme_config = default_theme_config();
            }
            ResetMode::Suggestions => self.suggestions.clear(),
        }
    }

    /// Fake cluster metadata shaped like a single-node deployment.
    pub fn meta(&self) -> (NodePayload, CollectionPayload) {
        let chunk_total: usize = self.documents.values().map(|d| d.chunks.len()).sum();
        let nodes = NodePayload {
            node_count: 1,
            weaviate_version: "mock".to_owned(),
            nodes: vec![NodeInfo { status: "HEALTHY".to_owned(), shards: 3, version: "mock".to_owned(), name: "node-0".to_owned() }],
        };
        let collections = vec![
            CollectionInfo { name: "VERBA_DOCUMENTS".to_owned(), count: self.documents.len() as u64 },
            CollectionInfo { name: format!("VERBA_EMBEDDING_{EMBEDDER}"), count: chunk_total as u64 },
            CollectionInfo { name: "VERBA_SUGGESTIONS".to_owned(), count: self.suggestions.len() as u64 },
        ];
        let payload = CollectionPayload { collection_count: 3, collections };
        (nodes, payload)
    }
}

fn to_verba_chunk(doc: &StoredDocument, chunk: &StoredChunk) -> VerbaChunk {
    VerbaChunk {
        uuid: chunk.uuid.clone(),
        content: chunk.content.clone(),
        chunk_id: chunk.chunk_id,
        doc_uuid: doc.uuid.clone(),
    }
}

fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn page_index(page: u32) -> usize {
    page.max(1) as usize - 1
}

fn page_count(items: usize) -> u32 {
    u32::try_from(items.max(1)).unwrap_or(u32::MAX)
}

/// 1-based page of `items`. Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: u32, page_size: u32) -> &[T] {
    let size = page_size.max(1) as usize;
    let start = page_index(page).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    &items[start..(start + size).min(items.len())]
}

/// Split text into windows of `words` whitespace-separated words.
pub fn chunk_words(text: &str, words: usize) -> Vec<String> {
    let all: Vec<&str> = text.split_whitespace().collect();
    all.chunks(words.max(1)).map(|window| window.join(" ")).collect()
}

fn chunk_chars(text: &str, size: usize) -> Vec<&str> {
    let mut pages = Vec::new();
    let mut start = 0;
    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % size == 0 {
            pages.push(&text[start..idx]);
            start = idx;
        }
    }
    pages.push(&text[start..]);
    pages
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(str::to_lowercase)
        .collect()
}

/// Fraction of query terms present in `content`.
fn overlap_score(terms: &[String], content: &str) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    let lower = content.to_lowercase();
    let hits = terms.iter().filter(|t| lower.contains(t.as_str())).count();
    hits as f64 / terms.len() as f64
}

/// Deterministic point in `[-1, 1]^3` for a chunk of text.
pub fn pseudo_vector(content: &str) -> Vector3 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let bits = hasher.finish();
    let axis = |shift: u32| f64::from(((bits >> shift) & 0xFFFF) as u16) / f64::from(u16::MAX) * 2.0 - 1.0;
    Vector3 { x: axis(0), y: axis(16), z: axis(32) }
}

fn setting(kind: &str, value: Value, description: &str, values: &[&str]) -> ConfigSetting {
    ConfigSetting {
        kind: kind.to_owned(),
        value,
        description: description.to_owned(),
        values: values.iter().map(|v| (*v).to_owned()).collect(),
    }
}

fn component(name: &str, kind: &str, description: &str, config: Vec<(&str, ConfigSetting)>) -> RagComponentConfig {
    RagComponentConfig {
        name: name.to_owned(),
        description: description.to_owned(),
        kind: kind.to_owned(),
        config: config.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        ..RagComponentConfig::default()
    }
}

fn stage(selected: &str, components: Vec<RagComponentConfig>) -> RagComponentClass {
    RagComponentClass {
        selected: selected.to_owned(),
        components: components.into_iter().map(|c| (c.name.clone(), c)).collect(),
    }
}

/// Pipeline config served before the user saves their own.
pub fn default_rag_config() -> RagConfig {
    let mut config = RagConfig::new();
    config.insert(
        "Reader".to_owned(),
        stage("Default", vec![component("Default", "FILE", "Reads plain text, markdown and JSON files", Vec::new())]),
    );
    config.insert(
        "Chunker".to_owned(),
        stage(
            "Token",
            vec![
                component(
                    "Token",
                    "",
                    "Splits documents into fixed-size word windows",
                    vec![
                        ("Tokens", setting("number", json!(CHUNK_WORDS), "Words per chunk", &[])),
                        ("Overlap", setting("number", json!(0), "Words shared between chunks", &[])),
                    ],
                ),
                component(
                    "Sentence",
                    "",
                    "Splits documents on sentence boundaries",
                    vec![("Sentences", setting("number", json!(5), "Sentences per chunk", &[]))],
                ),
            ],
        ),
    );
    config.insert(
        "Embedder".to_owned(),
        stage(
            EMBEDDER,
            vec![component(
                EMBEDDER,
                "",
                "Hash-based embeddings for local testing",
                vec![("Model", setting("dropdown", json!("mock-3d"), "Embedding model", &["mock-3d"]))],
            )],
        ),
    );
    config.insert(
        "Retriever".to_owned(),
        stage(
            "Advanced",
            vec![component(
                "Advanced",
                "",
                "Term-overlap retrieval over chunks",
                vec![
                    ("Search Mode", setting("dropdown", json!("Hybrid Search"), "Search strategy", &["Hybrid Search"])),
                    ("Limit Mode", setting("dropdown", json!("Autocut"), "How to cap results", &["Autocut", "Fixed"])),
                    ("Limit/Sensitivity", setting("number", json!(1), "Result cap or autocut sensitivity", &[])),
                ],
            )],
        ),
    );
    config.insert(
        "Generator".to_owned(),
        stage(
            "Echo",
            vec![
                component(
                    "Echo",
                    "",
                    "Answers from the retrieved context without a model",
                    vec![("System Message", setting("text", json!("You are Verba, a chatbot for RAG."), "System prompt", &[]))],
                ),
                component(
                    "OpenAI",
                    "",
                    "Requires an OpenAI key",
                    vec![("API Key", setting("password", json!(""), "OpenAI API key", &[]))],
                ),
            ],
        ),
    );
    if let Some(openai) = config.get_mut("Generator").and_then(|g| g.components.get_mut("OpenAI")) {
        openai.available = false;
        openai.variables = vec!["OPENAI_API_KEY".to_owned()];
    }
    config
}

/// Light and Dark themes, Light active.
pub fn default_theme_config() -> ThemeConfig {
    let light = Theme::default();
    let mut dark = Theme { theme_name: "Dark".to_owned(), ..Theme::default() };
    dark.extra.insert("bg_color".to_owned(), json!({ "type": "color", "color": "#202020", "description": "Background" }));
    let mut themes = BTreeMap::new();
    themes.insert(light.theme_name.clone(), light.clone());
    themes.insert(dark.theme_name.clone(), dark);
    ThemeConfig { theme: light, themes }
}
