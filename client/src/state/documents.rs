//! Document explorer state: search, paging, detail panes.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use frames::ApiResponse;
use frames::api::{
    ChunksResponse, ContentResponse, ContentSnippet, DocumentPreview, DocumentResponse, DocumentsResponse,
    VectorGroups, VectorsResponse, VerbaChunk, VerbaDocument,
};

pub const DOCUMENT_PAGE_SIZE: u32 = 50;
pub const CHUNK_PAGE_SIZE: u32 = 10;

/// Detail pane tab for the selected document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentTab {
    #[default]
    Content,
    Chunks,
    Vectors,
}

#[derive(Clone, Debug)]
pub struct DocumentsState {
    pub query: String,
    pub label_filter: Vec<String>,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub documents: Vec<DocumentPreview>,
    pub labels: Vec<String>,
    pub selected: Option<String>,
    pub tab: DocumentTab,
    pub detail: Option<VerbaDocument>,
    pub content: Vec<ContentSnippet>,
    pub content_page: u32,
    pub max_content_page: u32,
    pub chunks: Vec<VerbaChunk>,
    pub chunk_page: u32,
    pub vectors: Option<VectorGroups>,
    pub show_all_vectors: bool,
    /// Document awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub error: Option<String>,
}

impl Default for DocumentsState {
    fn default() -> Self {
        Self {
            query: String::new(),
            label_filter: Vec::new(),
            page: 1,
            page_size: DOCUMENT_PAGE_SIZE,
            total: 0,
            documents: Vec::new(),
            labels: Vec::new(),
            selected: None,
            tab: DocumentTab::Content,
            detail: None,
            content: Vec::new(),
            content_page: 1,
            max_content_page: 1,
            chunks: Vec::new(),
            chunk_page: 1,
            vectors: None,
            show_all_vectors: false,
            pending_delete: None,
            error: None,
        }
    }
}

impl DocumentsState {
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_owned();
        self.page = 1;
    }

    /// Add or remove a label from the filter. Filtering restarts at page 1.
    pub fn toggle_label(&mut self, label: &str) {
        if let Some(pos) = self.label_filter.iter().position(|l| l == label) {
            self.label_filter.remove(pos);
        } else {
            self.label_filter.push(label.to_owned());
        }
        self.page = 1;
    }

    #[must_use]
    pub fn page_count(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total.div_ceil(size)).unwrap_or(u32::MAX).max(1)
    }

    pub fn next_page(&mut self) -> bool {
        if self.page >= self.page_count() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn apply_list(&mut self, response: DocumentsResponse) {
        if let Some(err) = response.error_message() {
            self.error = Some(err.to_owned());
            return;
        }
        self.error = None;
        self.documents = response.documents;
        self.labels = response.labels;
        self.total = response.total_documents;
        self.page = self.page.min(self.page_count());
    }

    /// Open a document's detail panes. Returns `false` if already selected.
    pub fn select(&mut self, uuid: &str) -> bool {
        if self.selected.as_deref() == Some(uuid) {
            return false;
        }
        self.selected = Some(uuid.to_owned());
        self.tab = DocumentTab::Content;
        self.detail = None;
        self.content.clear();
        self.content_page = 1;
        self.max_content_page = 1;
        self.chunks.clear();
        self.chunk_page = 1;
        self.vectors = None;
        true
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
        self.detail = None;
        self.content.clear();
        self.chunks.clear();
        self.vectors = None;
    }

    pub fn apply_document(&mut self, response: DocumentResponse) {
        match response.error_message() {
            Some(err) => self.error = Some(err.to_owned()),
            None => self.detail = response.document,
        }
    }

    pub fn apply_content(&mut self, response: ContentResponse) {
        if let Some(err) = response.error_message() {
            self.error = Some(err.to_owned());
            return;
        }
        self.content = response.content;
        self.max_content_page = response.max_page.max(1);
        self.content_page = self.content_page.min(self.max_content_page);
    }

    pub fn next_content_page(&mut self) -> bool {
        if self.content_page >= self.max_content_page {
            return false;
        }
        self.content_page += 1;
        true
    }

    pub fn prev_content_page(&mut self) -> bool {
        if self.content_page <= 1 {
            return false;
        }
        self.content_page -= 1;
        true
    }

    pub fn apply_chunks(&mut self, response: ChunksResponse) {
        if let Some(err) = response.error_message() {
            self.error = Some(err.to_owned());
            return;
        }
        self.chunks = response.chunks.unwrap_or_default();
    }

    /// Advance the chunk page only while the current page is full.
    pub fn next_chunk_page(&mut self) -> bool {
        if self.chunks.len() < CHUNK_PAGE_SIZE as usize {
            return false;
        }
        self.chunk_page += 1;
        true
    }

    pub fn prev_chunk_page(&mut self) -> bool {
        if self.chunk_page <= 1 {
            return false;
        }
        self.chunk_page -= 1;
        true
    }

    pub fn apply_vectors(&mut self, response: VectorsResponse) {
        match response.error_message() {
            Some(err) => self.error = Some(err.to_owned()),
            None => self.vectors = Some(response.vector_groups),
        }
    }

    pub fn request_delete(&mut self, uuid: &str) {
        self.pending_delete = Some(uuid.to_owned());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the confirmed delete target.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// Drop a deleted document from the list and close it if open.
    pub fn apply_deleted(&mut self, uuid: &str) {
        let before = self.documents.len();
        self.documents.retain(|d| d.uuid != uuid);
        if self.documents.len() != before {
            self.total = self.total.saturating_sub(1);
        }
        if self.selected.as_deref() == Some(uuid) {
            self.close_detail();
        }
    }
}
