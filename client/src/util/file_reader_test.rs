use super::*;

#[test]
fn url_draft_requires_http_scheme() {
    assert!(url_draft("ftp://x", &RagConfig::default()).is_none());
    assert!(url_draft("  ", &RagConfig::default()).is_none());
    let draft = url_draft(" https://weaviate.io/blog ", &RagConfig::default()).expect("draft");
    assert!(draft.is_url);
    assert_eq!(draft.file_id, "https://weaviate.io/blog");
}
