//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! store sits behind one `RwLock`; handlers hold it only for synchronous
//! service calls, never across socket writes.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::services::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<RwLock<Store>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config: Arc::new(config), store: Arc::new(RwLock::new(Store::new())) }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Local-mode state with no streaming delay.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(ServerConfig { token_delay_ms: 0, ..ServerConfig::default() })
    }

    #[must_use]
    pub fn demo_app_state() -> AppState {
        AppState::new(ServerConfig {
            token_delay_ms: 0,
            production: crate::config::Production::Demo,
            ..ServerConfig::default()
        })
    }
}
