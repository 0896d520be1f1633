use super::*;
use crate::services::store::NewDocument;
use crate::state::test_helpers::{demo_app_state, test_app_state};
use frames::api::{ResetMode, UserConfig};
use frames::RagConfig;

fn weaviate(url: &str) -> Credentials {
    Credentials { deployment: Deployment::Weaviate, url: url.to_owned(), ..Credentials::default() }
}

async fn seed(state: &AppState, title: &str, content: &str) -> String {
    let doc = NewDocument {
        title: title.to_owned(),
        labels: vec!["Document".to_owned()],
        content: content.to_owned(),
        ..NewDocument::default()
    };
    state.store.write().await.insert(doc, false).expect("seed").0
}

#[test]
fn remote_deployments_need_a_url() {
    assert!(validate_credentials(&Credentials::default()).is_ok());
    assert!(validate_credentials(&weaviate("http://w:8080")).is_ok());
    let err = validate_credentials(&weaviate(" ")).expect_err("missing url");
    assert!(err.contains("Weaviate deployments"));
}

#[test]
fn demo_refusal_is_a_200_with_message() {
    let refusal = demo_refusal();
    assert_eq!(refusal.status_code(), Some(200));
    assert_eq!(refusal.status, Value::from("200"));
    assert_eq!(refusal.status_msg, DEMO_REFUSAL);
}

#[tokio::test]
async fn health_reports_mode_and_deployments() {
    let Json(local) = health(State(test_app_state())).await;
    assert_eq!(local.message, "Alive!");
    assert_eq!(local.production, "Local");
    assert_eq!(local.default_deployment, "Local");

    let Json(demo) = health(State(demo_app_state())).await;
    assert_eq!(demo.production, "Demo");
    assert!(demo.deployments.weaviate_url.is_empty());
}

#[tokio::test]
async fn connect_returns_configs_or_400() {
    let state = test_app_state();
    let ok = connect(State(state.clone()), Ok(Json(ConnectRequest::default()))).await.expect("connect");
    assert_eq!(ok.status(), StatusCode::OK);

    let refused = ConnectRequest { credentials: weaviate(""), port: String::new() };
    let response = connect(State(state), Ok(Json(refused))).await.expect("connect");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn demo_mode_refuses_config_writes() {
    let state = demo_app_state();
    let request = SetRagConfigRequest { rag_config: RagConfig::new(), credentials: Credentials::default() };
    let Json(reply) = set_rag_config(State(state.clone()), Ok(Json(request))).await.expect("reply");
    assert_eq!(reply.status_msg, DEMO_REFUSAL);
    assert!(!state.store.read().await.rag_config.is_empty());

    let request = SetUserConfigRequest { user_config: UserConfig { getting_started: false }, credentials: Credentials::default() };
    let Json(reply) = set_user_config(State(state.clone()), Ok(Json(request))).await.expect("reply");
    assert_eq!(reply.status_msg, DEMO_REFUSAL);
    assert!(state.store.read().await.user_config.getting_started);
}

#[tokio::test]
async fn local_mode_applies_config_writes() {
    let state = test_app_state();
    let request = SetUserConfigRequest { user_config: UserConfig { getting_started: false }, credentials: Credentials::default() };
    let Json(reply) = set_user_config(State(state.clone()), Ok(Json(request))).await.expect("reply");
    assert_eq!(reply.status_code(), Some(200));
    assert!(!state.store.read().await.user_config.getting_started);

    let Json(reply) = set_rag_config(
        State(state.clone()),
        Ok(Json(SetRagConfigRequest { rag_config: RagConfig::new(), credentials: Credentials::default() })),
    )
    .await
    .expect("reply");
    assert_eq!(reply.status_code(), Some(200));
    let Json(config) = get_rag_config(State(state), Ok(Json(Credentials::default()))).await.expect("config");
    assert!(config.rag_config.is_empty());
}

#[tokio::test]
async fn unknown_document_is_an_in_body_error() {
    let state = test_app_state();
    let request = DocumentRequest { uuid: "nope".into(), credentials: Credentials::default() };
    let Json(reply) = get_document(State(state), Ok(Json(request))).await.expect("reply");
    assert_eq!(reply.error, NOT_FOUND);
    assert!(reply.document.is_none());
}

#[tokio::test]
async fn query_then_delete_document() {
    let state = test_app_state();
    let uuid = seed(&state, "rust.md", "Rust ownership rules").await;

    let request = QueryRequest { query: "ownership".into(), ..QueryRequest::default() };
    let Json(reply) = query(State(state.clone()), Ok(Json(request))).await.expect("query");
    assert_eq!(reply.documents.len(), 1);
    assert_eq!(reply.context, "Rust ownership rules");

    let request = DocumentRequest { uuid: uuid.clone(), credentials: Credentials::default() };
    delete_document(State(state.clone()), Ok(Json(request))).await.expect("delete");
    assert_eq!(state.store.read().await.document_count(), 0);
}

#[tokio::test]
async fn demo_mode_keeps_documents_on_delete_and_reset() {
    let state = demo_app_state();
    let uuid = seed(&state, "a.md", "alpha").await;
    delete_document(State(state.clone()), Ok(Json(DocumentRequest { uuid, credentials: Credentials::default() })))
        .await
        .expect("delete");
    reset(State(state.clone()), Ok(Json(ResetRequest { reset_mode: ResetMode::All, credentials: Credentials::default() })))
        .await
        .expect("reset");
    assert_eq!(state.store.read().await.document_count(), 1);
}

#[tokio::test]
async fn empty_query_is_refused_in_body() {
    let Json(reply) = query(State(test_app_state()), Ok(Json(QueryRequest::default()))).await.expect("query");
    assert_eq!(reply.error, "Query is empty");
}

#[tokio::test]
async fn document_listing_reports_labels_and_total() {
    let state = test_app_state();
    seed(&state, "a.md", "alpha").await;
    seed(&state, "b.md", "beta").await;
    let request = SearchDocumentsRequest { page: 1, page_size: 1, ..SearchDocumentsRequest::default() };
    let Json(reply) = get_all_documents(State(state), Ok(Json(request))).await.expect("list");
    assert_eq!(reply.documents.len(), 1);
    assert_eq!(reply.total_documents, 2);
    assert_eq!(reply.labels, vec!["Document".to_owned()]);
}
