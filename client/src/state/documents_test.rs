use super::*;

fn preview(uuid: &str) -> DocumentPreview {
    DocumentPreview { title: format!("{uuid}.md"), uuid: uuid.to_owned(), labels: vec!["Document".into()] }
}

fn listed(total: u64, uuids: &[&str]) -> DocumentsState {
    let mut state = DocumentsState::default();
    state.apply_list(DocumentsResponse {
        documents: uuids.iter().map(|u| preview(u)).collect(),
        labels: vec!["Document".into()],
        error: String::new(),
        total_documents: total,
    });
    state
}

#[test]
fn page_count_is_ceiling_with_floor_of_one() {
    assert_eq!(DocumentsState::default().page_count(), 1);
    assert_eq!(listed(50, &[]).page_count(), 1);
    assert_eq!(listed(51, &[]).page_count(), 2);
}

#[test]
fn paging_is_bounded() {
    let mut state = listed(120, &["a"]);
    assert!(!state.prev_page());
    assert!(state.next_page());
    assert!(state.next_page());
    assert!(!state.next_page());
    assert_eq!(state.page, 3);
}

#[test]
fn filters_reset_to_first_page() {
    let mut state = listed(120, &["a"]);
    state.next_page();
    state.toggle_label("Document");
    assert_eq!(state.page, 1);
    assert_eq!(state.label_filter, vec!["Document".to_owned()]);
    state.next_page();
    state.set_query("rust");
    assert_eq!(state.page, 1);
    state.toggle_label("Document");
    assert!(state.label_filter.is_empty());
}

#[test]
fn list_error_keeps_previous_rows() {
    let mut state = listed(2, &["a", "b"]);
    state.apply_list(DocumentsResponse { error: "weaviate down".into(), ..DocumentsResponse::default() });
    assert_eq!(state.documents.len(), 2);
    assert_eq!(state.error.as_deref(), Some("weaviate down"));
}

#[test]
fn select_resets_detail_panes() {
    let mut state = listed(1, &["a"]);
    assert!(state.select("a"));
    state.apply_content(ContentResponse {
        error: String::new(),
        content: vec![ContentSnippet { content: "hello".into(), ..ContentSnippet::default() }],
        max_page: 3,
    });
    state.next_content_page();
    assert_eq!(state.content_page, 2);
    assert!(!state.select("a"));
    assert!(state.select("b"));
    assert!(state.content.is_empty());
    assert_eq!(state.content_page, 1);
}

#[test]
fn content_paging_respects_max_page() {
    let mut state = DocumentsState::default();
    state.apply_content(ContentResponse { max_page: 2, ..ContentResponse::default() });
    assert!(state.next_content_page());
    assert!(!state.next_content_page());
    assert!(state.prev_content_page());
    assert!(!state.prev_content_page());
}

#[test]
fn chunk_paging_stops_on_partial_page() {
    let mut state = DocumentsState::default();
    state.apply_chunks(ChunksResponse { error: String::new(), chunks: Some(vec![VerbaChunk::default(); 3]) });
    assert!(!state.next_chunk_page());
    state.apply_chunks(ChunksResponse {
        error: String::new(),
        chunks: Some(vec![VerbaChunk::default(); CHUNK_PAGE_SIZE as usize]),
    });
    assert!(state.next_chunk_page());
    assert_eq!(state.chunk_page, 2);
}

#[test]
fn delete_flow_requires_confirmation() {
    let mut state = listed(2, &["a", "b"]);
    state.select("a");
    state.request_delete("a");
    state.cancel_delete();
    assert!(state.confirm_delete().is_none());

    state.request_delete("a");
    let target = state.confirm_delete().expect("confirmed");
    state.apply_deleted(&target);
    assert_eq!(state.documents, vec![preview("b")]);
    assert_eq!(state.total, 1);
    assert!(state.selected.is_none());
}

#[test]
fn vectors_and_document_errors_surface() {
    let mut state = DocumentsState::default();
    state.apply_vectors(VectorsResponse { error: "no embedder".into(), ..VectorsResponse::default() });
    assert!(state.vectors.is_none());
    assert_eq!(state.error.as_deref(), Some("no embedder"));

    state.apply_document(DocumentResponse {
        error: String::new(),
        document: Some(VerbaDocument { title: "a.md".into(), ..VerbaDocument::default() }),
    });
    assert_eq!(state.detail.as_ref().map(|d| d.title.as_str()), Some("a.md"));
}
