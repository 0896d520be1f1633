//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TOKEN_DELAY_MS: u64 = 20;

/// How the backend treats writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Local,
    /// Public demo: config writes, deletes, resets and imports are refused.
    Demo,
}

impl Production {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Demo => "Demo",
        }
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("demo") => Self::Demo,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub production: Production,
    pub google_tag: String,
    pub default_deployment: String,
    pub weaviate_url: String,
    pub weaviate_api_key: String,
    /// Pause between streamed answer tokens.
    pub token_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            production: Production::Local,
            google_tag: String::new(),
            default_deployment: "Local".to_owned(),
            weaviate_url: String::new(),
            weaviate_api_key: String::new(),
            token_delay_ms: DEFAULT_TOKEN_DELAY_MS,
        }
    }
}

impl ServerConfig {
    /// Build config from the process environment (after `.env` is loaded).
    ///
    /// - `VERBA_MOCK_PORT`: listen port, default 8000
    /// - `VERBA_PRODUCTION`: `Local` (default) or `Demo`
    /// - `VERBA_GOOGLE_TAG`: analytics tag echoed by `/api/health`
    /// - `DEFAULT_DEPLOYMENT`: deployment the front end auto-connects to
    /// - `WEAVIATE_URL_VERBA`, `WEAVIATE_API_KEY_VERBA`: advertised Weaviate credentials
    /// - `VERBA_MOCK_TOKEN_DELAY_MS`: per-token streaming delay, default 20
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("VERBA_MOCK_PORT").and_then(|v| v.trim().parse().ok()).unwrap_or(defaults.port),
            production: Production::parse(lookup("VERBA_PRODUCTION").as_deref()),
            google_tag: lookup("VERBA_GOOGLE_TAG").unwrap_or_default(),
            default_deployment: lookup("DEFAULT_DEPLOYMENT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_deployment),
            weaviate_url: lookup("WEAVIATE_URL_VERBA").unwrap_or_default(),
            weaviate_api_key: lookup("WEAVIATE_API_KEY_VERBA").unwrap_or_default(),
            token_delay_ms: lookup("VERBA_MOCK_TOKEN_DELAY_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.token_delay_ms),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.production == Production::Demo
    }
}
