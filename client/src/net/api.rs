//! REST API helpers for communicating with the backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<T, String>`. Transport failures, non-2xx
//! statuses, undecodable bodies and in-body application errors
//! (`{"error": "..."}` with a 200 status) all collapse into the `Err` string
//! so views can show one status toast without retrying.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use frames::Credentials;
use frames::api::ApiResponse;
use frames::api::{
    AllSuggestionsRequest, AllSuggestionsResponse, ChunkRequest, ChunkResponse, ChunksRequest, ChunksResponse,
    ConnectRequest, ConnectResponse, ContentRequest, ContentResponse, DatacountRequest, DatacountResponse,
    DeleteSuggestionRequest, DocumentRequest, DocumentResponse, DocumentsResponse, HealthResponse, LabelsResponse,
    MetaResponse, QueryRequest, QueryResponse, RagConfigResponse, ResetRequest, SearchDocumentsRequest,
    SetRagConfigRequest, SetThemeConfigRequest, SetUserConfigRequest, StatusResponse, SuggestionsRequest,
    SuggestionsResponse, ThemeConfigResponse, UserConfigResponse, VectorsRequest, VectorsResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(not(feature = "hydrate"))]
const NOT_AVAILABLE: &str = "not available on server";

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(name: &str) -> String {
    format!("/api/{name}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(name: &str, status: u16) -> String {
    format!("{name} failed: {status}")
}

/// Turn an in-body application error into `Err`.
fn checked<T: ApiResponse>(body: T) -> Result<T, String> {
    match body.error_message() {
        Some(err) => Err(err.to_owned()),
        None => Ok(body),
    }
}

async fn get_json<T: DeserializeOwned>(name: &str) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&endpoint(name))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message(name, resp.status()));
        }
        resp.json::<T>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        Err(NOT_AVAILABLE.to_owned())
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(name: &str, body: &B) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&endpoint(name))
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message(name, resp.status()));
        }
        resp.json::<T>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, body);
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// POST whose reply carries no body worth decoding.
async fn post_unit<B: Serialize>(name: &str, body: &B) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&endpoint(name))
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message(name, resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, body);
        Err(NOT_AVAILABLE.to_owned())
    }
}

async fn post_checked<B: Serialize, T: DeserializeOwned + ApiResponse>(name: &str, body: &B) -> Result<T, String> {
    post_json(name, body).await.and_then(checked)
}

/// `GET /api/health`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn health() -> Result<HealthResponse, String> {
    get_json("health").await
}

/// `POST /api/connect`: validate credentials and load the backend configs.
///
/// # Errors
///
/// Returns an error string if the request fails or the backend refuses the
/// credentials.
pub async fn connect(request: &ConnectRequest) -> Result<ConnectResponse, String> {
    post_checked("connect", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_rag_config(credentials: &Credentials) -> Result<RagConfigResponse, String> {
    post_checked("get_rag_config", credentials).await
}

/// Save the pipeline configuration. Demo deployments answer with a
/// non-error status message and keep the old config.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not 200.
pub async fn set_rag_config(request: &SetRagConfigRequest) -> Result<StatusResponse, String> {
    post_checked("set_rag_config", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_user_config(credentials: &Credentials) -> Result<UserConfigResponse, String> {
    post_checked("get_user_config", credentials).await
}

/// # Errors
///
/// Returns an error string if the request fails or the status is not 200.
pub async fn set_user_config(request: &SetUserConfigRequest) -> Result<StatusResponse, String> {
    post_checked("set_user_config", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_theme_config(credentials: &Credentials) -> Result<ThemeConfigResponse, String> {
    post_checked("get_theme_config", credentials).await
}

/// # Errors
///
/// Returns an error string if the request fails or the status is not 200.
pub async fn set_theme_config(request: &SetThemeConfigRequest) -> Result<StatusResponse, String> {
    post_checked("set_theme_config", request).await
}

/// Retrieval step of a chat query.
///
/// # Errors
///
/// Returns an error string if the request fails or retrieval reports an error.
pub async fn query(request: &QueryRequest) -> Result<QueryResponse, String> {
    post_checked("query", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_all_documents(request: &SearchDocumentsRequest) -> Result<DocumentsResponse, String> {
    post_checked("get_all_documents", request).await
}

/// # Errors
///
/// Returns an error string if the request fails or the document is unknown.
pub async fn get_document(request: &DocumentRequest) -> Result<DocumentResponse, String> {
    post_checked("get_document", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn delete_document(request: &DocumentRequest) -> Result<(), String> {
    post_unit("delete_document", request).await
}

/// One page of document content, highlighted by chunk scores when given.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_content(request: &ContentRequest) -> Result<ContentResponse, String> {
    post_checked("get_content", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_chunks(request: &ChunksRequest) -> Result<ChunksResponse, String> {
    post_checked("get_chunks", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_chunk(request: &ChunkRequest) -> Result<ChunkResponse, String> {
    post_checked("get_chunk", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_vectors(request: &VectorsRequest) -> Result<VectorsResponse, String> {
    post_checked("get_vectors", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_labels(credentials: &Credentials) -> Result<LabelsResponse, String> {
    post_json("get_labels", credentials).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_datacount(request: &DatacountRequest) -> Result<DatacountResponse, String> {
    post_json("get_datacount", request).await
}

/// Autocompletion candidates for a partially typed query.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_suggestions(request: &SuggestionsRequest) -> Result<SuggestionsResponse, String> {
    post_json("get_suggestions", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_all_suggestions(request: &AllSuggestionsRequest) -> Result<AllSuggestionsResponse, String> {
    post_json("get_all_suggestions", request).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn delete_suggestion(request: &DeleteSuggestionRequest) -> Result<(), String> {
    post_unit("delete_suggestion", request).await
}

/// Cluster node and collection statistics.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn get_meta(credentials: &Credentials) -> Result<MetaResponse, String> {
    post_checked("get_meta", credentials).await
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn reset(request: &ResetRequest) -> Result<(), String> {
    post_unit("reset", request).await
}
