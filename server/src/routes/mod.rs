//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the `/api/*` REST endpoints and the two `/ws/*`
//! sockets under a single Axum router. [`leptos_app`] additionally mounts
//! the Leptos front end with SSR and its static assets so one process
//! serves the whole application.

pub mod api;
pub mod ws;

use std::path::PathBuf;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

/// Request-level failure rendered as an HTTP error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidBody { status, .. } => *status,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// REST and websocket routes.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/connect", post(api::connect))
        .route("/api/get_rag_config", post(api::get_rag_config))
        .route("/api/set_rag_config", post(api::set_rag_config))
        .route("/api/get_user_config", post(api::get_user_config))
        .route("/api/set_user_config", post(api::set_user_config))
        .route("/api/get_theme_config", post(api::get_theme_config))
        .route("/api/set_theme_config", post(api::set_theme_config))
        .route("/api/query", post(api::query))
        .route("/api/get_all_documents", post(api::get_all_documents))
        .route("/api/get_document", post(api::get_document))
        .route("/api/delete_document", post(api::delete_document))
        .route("/api/get_content", post(api::get_content))
        .route("/api/get_chunks", post(api::get_chunks))
        .route("/api/get_chunk", post(api::get_chunk))
        .route("/api/get_vectors", post(api::get_vectors))
        .route("/api/get_labels", post(api::get_labels))
        .route("/api/get_datacount", post(api::get_datacount))
        .route("/api/get_suggestions", post(api::get_suggestions))
        .route("/api/get_all_suggestions", post(api::get_all_suggestions))
        .route("/api/delete_suggestion", post(api::delete_suggestion))
        .route("/api/reset", post(api::reset))
        .route("/api/get_meta", post(api::get_meta))
        .route("/ws/generate_stream", get(ws::generate_stream))
        .route("/ws/import_files", get(ws::import_files))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// API routes plus the Leptos front end with SSR.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(app(state).merge(leptos_router).nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}
