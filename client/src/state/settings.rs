//! Connection credentials, backend configuration and admin panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything the settings page edits lives here: the deployment the user
//! connects to, the RAG pipeline configuration returned by `/api/connect`,
//! the theme set, stored suggestions and cluster metadata. Other views read
//! `credentials` and `rag_config` from this state when they issue requests.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use frames::api::{
    AllSuggestionsResponse, ConnectRequest, ConnectResponse, HealthResponse, MetaResponse, ResetMode, Suggestion,
    UserConfig,
};
use frames::{ApiResponse, ConfigSetting, Credentials, Deployment, RagConfig, ThemeConfig};
use serde_json::Value;

/// Production mode label that makes the backend read-only.
pub const DEMO_MODE: &str = "Demo";
pub const SUGGESTION_PAGE_SIZE: u32 = 20;

#[derive(Clone, Debug)]
pub struct SettingsState {
    pub credentials: Credentials,
    pub port: String,
    pub connected: bool,
    pub connecting: bool,
    pub connect_error: Option<String>,
    pub production: String,
    pub gtag: String,
    pub rag_config: RagConfig,
    /// Local pipeline edits not yet saved with `set_rag_config`.
    pub rag_dirty: bool,
    pub user_config: UserConfig,
    pub theme_config: ThemeConfig,
    pub meta: Option<MetaResponse>,
    pub suggestions: Vec<Suggestion>,
    /// 1-based.
    pub suggestion_page: u32,
    pub suggestion_total: u64,
    /// Reset awaiting confirmation.
    pub pending_reset: Option<ResetMode>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            port: String::new(),
            connected: false,
            connecting: false,
            connect_error: None,
            production: "Local".to_owned(),
            gtag: String::new(),
            rag_config: RagConfig::new(),
            rag_dirty: false,
            user_config: UserConfig::default(),
            theme_config: ThemeConfig::default(),
            meta: None,
            suggestions: Vec::new(),
            suggestion_page: 1,
            suggestion_total: 0,
            pending_reset: None,
        }
    }
}

impl SettingsState {
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.production == DEMO_MODE
    }

    /// Adopt the backend's advertised defaults. Credentials the user already
    /// typed are left alone.
    pub fn apply_health(&mut self, health: HealthResponse) {
        self.production = health.production;
        self.gtag = health.gtag;
        if let Some(deployment) = Deployment::parse(&health.default_deployment) {
            self.credentials.deployment = deployment;
            self.credentials.default_deployment = Some(health.default_deployment);
        }
        if self.credentials.url.is_empty() {
            self.credentials.url = health.deployments.weaviate_url;
        }
        if self.credentials.key.is_empty() {
            self.credentials.key = health.deployments.weaviate_api_key;
        }
    }

    /// Start a connect attempt. Returns `None` while one is in flight.
    pub fn begin_connect(&mut self) -> Option<ConnectRequest> {
        if self.connecting {
            return None;
        }
        self.connecting = true;
        self.connect_error = None;
        Some(ConnectRequest { credentials: self.credentials.clone(), port: self.port.clone() })
    }

    /// Apply the connect reply.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message when the connection was refused.
    pub fn apply_connect(&mut self, response: ConnectResponse) -> Result<(), String> {
        self.connecting = false;
        if let Some(err) = response.error_message() {
            return Err(self.fail_connect(err));
        }
        if !response.connected {
            return Err(self.fail_connect("Could not connect"));
        }
        self.connected = true;
        self.rag_config = response.rag_config;
        self.rag_dirty = false;
        self.user_config = response.user_config;
        self.theme_config.theme = response.theme;
        if !response.themes.is_empty() {
            self.theme_config.themes = response.themes;
        }
        Ok(())
    }

    /// Transport failure or refusal while connecting.
    pub fn fail_connect(&mut self, err: &str) -> String {
        self.connecting = false;
        self.connected = false;
        self.connect_error = Some(err.to_owned());
        err.to_owned()
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
        self.rag_config.clear();
        self.rag_dirty = false;
        self.meta = None;
    }

    pub fn set_deployment(&mut self, deployment: Deployment) {
        self.credentials.deployment = deployment;
    }

    /// Choose the implementation for one pipeline stage.
    pub fn select_component(&mut self, stage: &str, component: &str) -> bool {
        let changed = self.rag_config.get_mut(stage).is_some_and(|class| class.select(component));
        self.rag_dirty |= changed;
        changed
    }

    /// Update one setting of a component from form input.
    pub fn set_component_setting(&mut self, stage: &str, component: &str, key: &str, raw: &str) -> bool {
        let changed = edit_component_setting(&mut self.rag_config, stage, component, key, raw);
        self.rag_dirty |= changed;
        changed
    }

    pub fn mark_rag_saved(&mut self) {
        self.rag_dirty = false;
    }

    pub fn select_theme(&mut self, name: &str) -> bool {
        self.theme_config.select(name)
    }

    pub fn request_reset(&mut self, mode: ResetMode) {
        self.pending_reset = Some(mode);
    }

    pub fn cancel_reset(&mut self) {
        self.pending_reset = None;
    }

    pub fn confirm_reset(&mut self) -> Option<ResetMode> {
        self.pending_reset.take()
    }

    pub fn apply_suggestion_page(&mut self, response: AllSuggestionsResponse) {
        self.suggestions = response.suggestions;
        self.suggestion_total = response.total_count;
    }

    #[must_use]
    pub fn suggestion_page_count(&self) -> u32 {
        let pages = self.suggestion_total.div_ceil(u64::from(SUGGESTION_PAGE_SIZE));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn next_suggestion_page(&mut self) -> bool {
        if self.suggestion_page >= self.suggestion_page_count() {
            return false;
        }
        self.suggestion_page += 1;
        true
    }

    pub fn prev_suggestion_page(&mut self) -> bool {
        if self.suggestion_page <= 1 {
            return false;
        }
        self.suggestion_page -= 1;
        true
    }

    pub fn remove_suggestion(&mut self, uuid: &str) -> bool {
        let before = self.suggestions.len();
        self.suggestions.retain(|s| s.uuid != uuid);
        let removed = self.suggestions.len() != before;
        if removed {
            self.suggestion_total = self.suggestion_total.saturating_sub(1);
        }
        removed
    }
}

/// Validate and store one component setting in `config`. Numeric settings
/// only accept numbers; dropdowns only accept listed values. Returns `true`
/// when the stored value changed.
pub fn edit_component_setting(config: &mut RagConfig, stage: &str, component: &str, key: &str, raw: &str) -> bool {
    let Some(setting) = config
        .get_mut(stage)
        .and_then(|class| class.components.get_mut(component))
        .and_then(|c| c.config.get_mut(key))
    else {
        return false;
    };
    let Some(value) = setting_value(setting, raw) else {
        return false;
    };
    if setting.value == value {
        return false;
    }
    setting.value = value;
    true
}

fn setting_value(setting: &ConfigSetting, raw: &str) -> Option<Value> {
    match setting.kind.as_str() {
        "number" => {
            let number: f64 = raw.trim().parse().ok()?;
            if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
                #[allow(clippy::cast_possible_truncation)]
                return Some(Value::from(number as i64));
            }
            serde_json::Number::from_f64(number).map(Value::Number)
        }
        "dropdown" if !setting.values.is_empty() => {
            setting.values.iter().any(|v| v == raw).then(|| Value::from(raw))
        }
        "bool" | "boolean" => raw.parse::<bool>().ok().map(Value::from),
        _ => Some(Value::from(raw)),
    }
}
