//! # client
//!
//! Leptos + WASM browser front end for a Verba RAG backend: chat with
//! streamed answers, a document explorer, file ingestion over a chunked
//! websocket upload, and deployment settings.
//!
//! Browser-only code (HTTP, websockets, DOM access) sits behind the
//! `hydrate` feature; state transitions are plain Rust and tested natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic and console hooks, then hydrate the SSR
/// markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
