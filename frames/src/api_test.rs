use super::*;
use serde_json::json;

#[test]
fn mock_connect_response_parses() {
    let body = json!({
        "connected": true,
        "error": "",
        "rag_config": {"generator": {"name": "OpenAI"}},
        "user_config": {"getting_started": true},
        "theme": {},
        "themes": {}
    });
    let parsed: ConnectResponse = serde_json::from_value(body).expect("connect");
    assert!(parsed.connected);
    assert!(parsed.error_message().is_none());
    assert!(parsed.user_config.getting_started);
    assert!(parsed.theme.intro_text().starts_with("Welcome"));
}

#[test]
fn failed_connect_surfaces_error_message() {
    let parsed: ConnectResponse = serde_json::from_value(json!({
        "connected": false,
        "error": "Failed to connect to Weaviate timeout",
        "rag_config": {},
        "theme": {},
        "themes": {}
    }))
    .expect("connect");
    assert_eq!(parsed.error_message(), Some("Failed to connect to Weaviate timeout"));
}

#[test]
fn health_response_reads_deployment_keys() {
    let parsed: HealthResponse = serde_json::from_value(json!({
        "message": "Alive!",
        "production": "Local",
        "gtag": "",
        "deployments": {"WEAVIATE_URL_VERBA": "http://localhost:8079", "WEAVIATE_API_KEY_VERBA": ""},
        "default_deployment": "Local"
    }))
    .expect("health");
    assert_eq!(parsed.deployments.weaviate_url, "http://localhost:8079");
    assert_eq!(parsed.default_deployment, "Local");
}

#[test]
fn status_response_accepts_numeric_and_string_status() {
    let ok: StatusResponse = serde_json::from_value(json!({"status": 200})).expect("ok");
    assert_eq!(ok.status_code(), Some(200));
    assert!(ok.error_message().is_none());

    let demo: StatusResponse = serde_json::from_value(json!({
        "status": "200",
        "status_msg": "Config can't be updated in Production Mode"
    }))
    .expect("demo");
    assert_eq!(demo.status_code(), Some(200));

    let failed: StatusResponse = serde_json::from_value(json!({"status": 400})).expect("failed");
    assert_eq!(failed.error_message(), Some("request failed"));
    assert_eq!(StatusResponse::failed("nope").error_message(), Some("nope"));
}

#[test]
fn query_request_uses_backend_field_names() {
    let request = QueryRequest {
        query: "what".into(),
        document_filter: vec![DocumentFilter { title: "a".into(), uuid: "u1".into() }],
        ..QueryRequest::default()
    };
    let value = serde_json::to_value(&request).expect("json");
    assert!(value.get("RAG").is_some());
    assert_eq!(value["documentFilter"][0]["uuid"], "u1");
    assert_eq!(value["credentials"]["deployment"], "Local");
}

#[test]
fn documents_response_reads_total_documents() {
    let parsed: DocumentsResponse = serde_json::from_value(json!({
        "documents": [{"title": "a.md", "uuid": "u1", "labels": ["Document"]}],
        "labels": ["Document"],
        "error": "",
        "totalDocuments": 7
    }))
    .expect("documents");
    assert_eq!(parsed.total_documents, 7);
    assert_eq!(parsed.documents[0].labels, vec!["Document".to_owned()]);
}

#[test]
fn reset_mode_round_trips_labels() {
    assert_eq!(serde_json::to_value(ResetMode::Suggestions).expect("json"), json!("SUGGESTIONS"));
    assert_eq!(ResetMode::parse("documents"), Some(ResetMode::Documents));
    assert_eq!(ResetMode::parse("everything"), None);
}

#[test]
fn whitespace_error_is_not_an_error() {
    let parsed = QueryResponse { error: "  ".into(), ..QueryResponse::default() };
    assert!(parsed.error_message().is_none());
}
