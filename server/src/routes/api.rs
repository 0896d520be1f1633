//! REST endpoints under `/api`.
//!
//! Every endpoint except `health` is a POST with a JSON body. Application
//! failures (unknown document, refused credentials) are reported in the
//! response body with status 200 so clients handle them uniformly; only
//! malformed bodies are rejected with an HTTP error via [`ApiError`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use frames::api::{
    AllSuggestionsRequest, AllSuggestionsResponse, ChunkRequest, ChunkResponse, ChunksRequest, ChunksResponse,
    ConnectRequest, ConnectResponse, ContentRequest, ContentResponse, DatacountRequest, DatacountResponse,
    DeleteSuggestionRequest, Deployments, DocumentRequest, DocumentResponse, DocumentsResponse, HealthResponse,
    LabelsResponse, MetaResponse, QueryRequest, QueryResponse, RagConfigResponse, ResetRequest,
    SearchDocumentsRequest, SetRagConfigRequest, SetThemeConfigRequest, SetUserConfigRequest, StatusResponse,
    SuggestionsRequest, SuggestionsResponse, ThemeConfigResponse, UserConfigResponse, VectorsRequest,
    VectorsResponse,
};
use frames::{Credentials, Deployment};
use serde_json::{Value, json};
use tracing::{info, warn};

use super::ApiError;
use crate::state::AppState;

pub const DEMO_REFUSAL: &str = "Config can't be updated in Production Mode";
const NOT_FOUND: &str = "Document not found";

type Body<T> = Result<Json<T>, JsonRejection>;

/// Reply to a config write in Demo mode: a 200 status carrying the refusal.
pub fn demo_refusal() -> StatusResponse {
    StatusResponse { status: Value::from("200"), status_msg: DEMO_REFUSAL.to_owned() }
}

/// Credentials the mock accepts: remote deployments must name a URL.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), String> {
    match credentials.deployment {
        Deployment::Weaviate | Deployment::Custom if credentials.url.trim().is_empty() => Err(format!(
            "Failed to connect to Weaviate: a URL is required for {} deployments",
            credentials.deployment.as_str()
        )),
        _ => Ok(()),
    }
}

/// `GET /api/health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = &state.config;
    let deployments = if config.is_demo() {
        Deployments::default()
    } else {
        Deployments { weaviate_url: config.weaviate_url.clone(), weaviate_api_key: config.weaviate_api_key.clone() }
    };
    Json(HealthResponse {
        message: "Alive!".to_owned(),
        production: config.production.as_str().to_owned(),
        gtag: config.google_tag.clone(),
        deployments,
        default_deployment: config.default_deployment.clone(),
    })
}

/// `POST /api/connect`.
pub async fn connect(State(state): State<AppState>, payload: Body<ConnectRequest>) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    if let Err(error) = validate_credentials(&request.credentials) {
        warn!(deployment = request.credentials.deployment.as_str(), %error, "connect refused");
        let body = ConnectResponse { connected: false, error, ..ConnectResponse::default() };
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let store = state.store.read().await;
    info!(deployment = request.credentials.deployment.as_str(), "connected");
    Ok(Json(ConnectResponse {
        connected: true,
        error: String::new(),
        rag_config: store.rag_config.clone(),
        user_config: store.user_config.clone(),
        theme: store.theme_config.theme.clone(),
        themes: store.theme_config.themes.clone(),
    })
    .into_response())
}

pub async fn get_rag_config(
    State(state): State<AppState>,
    payload: Body<Credentials>,
) -> Result<Json<RagConfigResponse>, ApiError> {
    payload?;
    let store = state.store.read().await;
    Ok(Json(RagConfigResponse { rag_config: store.rag_config.clone(), error: String::new() }))
}

pub async fn set_rag_config(
    State(state): State<AppState>,
    payload: Body<SetRagConfigRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload?;
    if state.config.is_demo() {
        return Ok(Json(demo_refusal()));
    }
    state.store.write().await.rag_config = request.rag_config;
    info!("rag config updated");
    Ok(Json(StatusResponse { status: Value::from(200), status_msg: String::new() }))
}

pub async fn get_user_config(
    State(state): State<AppState>,
    payload: Body<Credentials>,
) -> Result<Json<UserConfigResponse>, ApiError> {
    payload?;
    let store = state.store.read().await;
    Ok(Json(UserConfigResponse { user_config: store.user_config.clone(), error: String::new() }))
}

pub async fn set_user_config(
    State(state): State<AppState>,
    payload: Body<SetUserConfigRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload?;
    if state.config.is_demo() {
        return Ok(Json(demo_refusal()));
    }
    state.store.write().await.user_config = request.user_config;
    Ok(Json(StatusResponse::ok("User config updated")))
}

pub async fn get_theme_config(
    State(state): State<AppState>,
    payload: Body<Credentials>,
) -> Result<Json<ThemeConfigResponse>, ApiError> {
    payload?;
    let store = state.store.read().await;
    Ok(Json(ThemeConfigResponse {
        theme: Some(store.theme_config.theme.clone()),
        themes: Some(store.theme_config.themes.clone()),
        error: String::new(),
    }))
}

pub async fn set_theme_config(
    State(state): State<AppState>,
    payload: Body<SetThemeConfigRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload?;
    if state.config.is_demo() {
        return Ok(Json(demo_refusal()));
    }
    let mut store = state.store.write().await;
    store.theme_config.theme = request.theme;
    if !request.themes.is_empty() {
        store.theme_config.themes = request.themes;
    }
    Ok(Json(StatusResponse { status: Value::from(200), status_msg: String::new() }))
}

/// Retrieval step of a chat turn.
pub async fn query(State(state): State<AppState>, payload: Body<QueryRequest>) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;
    if request.query.trim().is_empty() {
        return Ok(Json(QueryResponse { error: "Query is empty".to_owned(), ..QueryResponse::default() }));
    }
    let filter: Vec<String> = request.document_filter.iter().map(|f| f.uuid.clone()).collect();
    let (documents, context) = state.store.read().await.retrieve(&request.query, &request.labels, &filter);
    info!(query = %request.query, documents = documents.len(), "retrieved");
    Ok(Json(QueryResponse { error: String::new(), documents, context }))
}

pub async fn get_all_documents(
    State(state): State<AppState>,
    payload: Body<SearchDocumentsRequest>,
) -> Result<Json<DocumentsResponse>, ApiError> {
    let Json(request) = payload?;
    let store = state.store.read().await;
    let (documents, total_documents) = store.search(&request.query, &request.labels, request.page, request.page_size);
    Ok(Json(DocumentsResponse { documents, labels: store.labels(), error: String::new(), total_documents }))
}

pub async fn get_document(
    State(state): State<AppState>,
    payload: Body<DocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let Json(request) = payload?;
    let document = state.store.read().await.document(&request.uuid);
    let error = if document.is_none() { NOT_FOUND.to_owned() } else { String::new() };
    Ok(Json(DocumentResponse { error, document }))
}

/// Demo mode answers `{}` without deleting.
pub async fn delete_document(
    State(state): State<AppState>,
    payload: Body<DocumentRequest>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    if state.config.is_demo() {
        warn!(uuid = %request.uuid, "delete refused in demo mode");
        return Ok(Json(json!({})));
    }
    let removed = state.store.write().await.delete(&request.uuid);
    info!(uuid = %request.uuid, removed, "delete document");
    Ok(Json(json!({})))
}

pub async fn get_content(
    State(state): State<AppState>,
    payload: Body<ContentRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Json(request) = payload?;
    let response = match state.store.read().await.content(&request.uuid, request.page, &request.chunk_scores) {
        Some((content, max_page)) => ContentResponse { error: String::new(), content, max_page },
        None => ContentResponse { error: NOT_FOUND.to_owned(), ..ContentResponse::default() },
    };
    Ok(Json(response))
}

pub async fn get_chunks(
    State(state): State<AppState>,
    payload: Body<ChunksRequest>,
) -> Result<Json<ChunksResponse>, ApiError> {
    let Json(request) = payload?;
    let chunks = state.store.read().await.chunks(&request.uuid, request.page, request.page_size);
    let error = if chunks.is_none() { NOT_FOUND.to_owned() } else { String::new() };
    Ok(Json(ChunksResponse { error, chunks }))
}

pub async fn get_chunk(
    State(state): State<AppState>,
    payload: Body<ChunkRequest>,
) -> Result<Json<ChunkResponse>, ApiError> {
    let Json(request) = payload?;
    let chunk = state.store.read().await.chunk(&request.uuid);
    let error = if chunk.is_none() { "Chunk not found".to_owned() } else { String::new() };
    Ok(Json(ChunkResponse { error, chunk }))
}

pub async fn get_vectors(
    State(state): State<AppState>,
    payload: Body<VectorsRequest>,
) -> Result<Json<VectorsResponse>, ApiError> {
    let Json(request) = payload?;
    let response = match state.store.read().await.vectors(&request.uuid, request.show_all) {
        Some(vector_groups) => VectorsResponse { error: String::new(), vector_groups },
        None => VectorsResponse { error: NOT_FOUND.to_owned(), ..VectorsResponse::default() },
    };
    Ok(Json(response))
}

pub async fn get_labels(
    State(state): State<AppState>,
    payload: Body<Credentials>,
) -> Result<Json<LabelsResponse>, ApiError> {
    payload?;
    Ok(Json(LabelsResponse { labels: state.store.read().await.labels() }))
}

pub async fn get_datacount(
    State(state): State<AppState>,
    payload: Body<DatacountRequest>,
) -> Result<Json<DatacountResponse>, ApiError> {
    let Json(request) = payload?;
    let filter: Vec<String> = request.document_filter.iter().map(|f| f.uuid.clone()).collect();
    Ok(Json(DatacountResponse { datacount: state.store.read().await.datacount(&filter) }))
}

pub async fn get_suggestions(
    State(state): State<AppState>,
    payload: Body<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(SuggestionsResponse { suggestions: state.store.read().await.suggestions(&request.query, request.limit) }))
}

pub async fn get_all_suggestions(
    State(state): State<AppState>,
    payload: Body<AllSuggestionsRequest>,
) -> Result<Json<AllSuggestionsResponse>, ApiError> {
    let Json(request) = payload?;
    let (suggestions, total_count) = state.store.read().await.all_suggestions(request.page, request.page_size);
    Ok(Json(AllSuggestionsResponse { suggestions, total_count }))
}

pub async fn delete_suggestion(
    State(state): State<AppState>,
    payload: Body<DeleteSuggestionRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload?;
    if state.config.is_demo() {
        return Ok(Json(demo_refusal()));
    }
    let removed = state.store.write().await.delete_suggestion(&request.uuid);
    info!(uuid = %request.uuid, removed, "delete suggestion");
    Ok(Json(StatusResponse::ok("Suggestion deleted")))
}

/// Demo mode answers `{}` without resetting.
pub async fn reset(State(state): State<AppState>, payload: Body<ResetRequest>) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    if state.config.is_demo() {
        warn!(mode = request.reset_mode.as_str(), "reset refused in demo mode");
        return Ok(Json(json!({})));
    }
    state.store.write().await.reset(request.reset_mode);
    info!(mode = request.reset_mode.as_str(), "reset");
    Ok(Json(json!({})))
}

pub async fn get_meta(State(state): State<AppState>, payload: Body<Credentials>) -> Result<Json<MetaResponse>, ApiError> {
    payload?;
    let (node_payload, collection_payload) = state.store.read().await.meta();
    Ok(Json(MetaResponse { error: String::new(), node_payload, collection_payload }))
}
