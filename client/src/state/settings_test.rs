use super::*;
use frames::api::Deployments;
use frames::{RagComponentClass, RagComponentConfig, Theme};
use serde_json::json;
use std::collections::BTreeMap;

fn setting(kind: &str, value: Value, values: &[&str]) -> ConfigSetting {
    ConfigSetting {
        kind: kind.to_owned(),
        value,
        description: String::new(),
        values: values.iter().map(|v| (*v).to_owned()).collect(),
    }
}

fn sample_config() -> RagConfig {
    let mut token = RagComponentConfig { name: "Token".into(), ..RagComponentConfig::default() };
    token.config.insert("Tokens".into(), setting("number", json!(250), &[]));
    token.config.insert("Units".into(), setting("dropdown", json!("words"), &["words", "chars"]));
    let sentence = RagComponentConfig { name: "Sentence".into(), ..RagComponentConfig::default() };
    let gated = RagComponentConfig { name: "Semantic".into(), available: false, ..RagComponentConfig::default() };

    let mut components = BTreeMap::new();
    components.insert("Token".into(), token);
    components.insert("Sentence".into(), sentence);
    components.insert("Semantic".into(), gated);
    let mut config = RagConfig::new();
    config.insert("Chunker".into(), RagComponentClass { selected: "Token".into(), components });
    config
}

fn connected() -> SettingsState {
    let mut state = SettingsState::default();
    state.begin_connect().expect("connect");
    state
        .apply_connect(ConnectResponse { connected: true, rag_config: sample_config(), ..ConnectResponse::default() })
        .expect("connected");
    state
}

#[test]
fn health_fills_defaults_without_clobbering_user_input() {
    let mut state = SettingsState::default();
    state.credentials.key = "typed".into();
    state.apply_health(HealthResponse {
        message: "Alive!".into(),
        production: "Demo".into(),
        gtag: "G-1".into(),
        deployments: Deployments { weaviate_url: "http://w:8080".into(), weaviate_api_key: "env-key".into() },
        default_deployment: "Weaviate".into(),
    });
    assert!(state.is_demo());
    assert_eq!(state.credentials.deployment, Deployment::Weaviate);
    assert_eq!(state.credentials.url, "http://w:8080");
    assert_eq!(state.credentials.key, "typed");
    assert_eq!(state.credentials.default_deployment.as_deref(), Some("Weaviate"));
}

#[test]
fn connect_is_single_flight() {
    let mut state = SettingsState::default();
    assert!(state.begin_connect().is_some());
    assert!(state.begin_connect().is_none());
}

#[test]
fn connect_success_adopts_config_and_keeps_themes_when_empty() {
    let mut state = SettingsState::default();
    state.theme_config.themes.insert("Dark".into(), Theme::default());
    state.begin_connect();
    state
        .apply_connect(ConnectResponse { connected: true, rag_config: sample_config(), ..ConnectResponse::default() })
        .expect("connected");
    assert!(state.connected);
    assert!(!state.connecting);
    assert!(state.rag_config.contains_key("Chunker"));
    assert!(state.theme_config.themes.contains_key("Dark"));
}

#[test]
fn connect_error_is_reported() {
    let mut state = SettingsState::default();
    state.begin_connect();
    let err = state
        .apply_connect(ConnectResponse { error: "bad key".into(), ..ConnectResponse::default() })
        .expect_err("refused");
    assert_eq!(err, "bad key");
    assert_eq!(state.connect_error.as_deref(), Some("bad key"));
    assert!(!state.connected);

    state.begin_connect();
    assert!(state.apply_connect(ConnectResponse::default()).is_err());
}

#[test]
fn select_component_only_picks_available_and_marks_dirty() {
    let mut state = connected();
    assert!(!state.select_component("Chunker", "Semantic"));
    assert!(!state.rag_dirty);
    assert!(!state.select_component("Missing", "Token"));
    assert!(state.select_component("Chunker", "Sentence"));
    assert!(state.rag_dirty);
    state.mark_rag_saved();
    assert!(!state.rag_dirty);
}

#[test]
fn component_settings_are_validated_by_kind() {
    let mut state = connected();
    assert!(!state.set_component_setting("Chunker", "Token", "Tokens", "lots"));
    assert!(state.set_component_setting("Chunker", "Token", "Tokens", "300"));
    assert!(!state.set_component_setting("Chunker", "Token", "Tokens", "300"));
    assert!(!state.set_component_setting("Chunker", "Token", "Units", "bytes"));
    assert!(state.set_component_setting("Chunker", "Token", "Units", "chars"));
    assert!(!state.set_component_setting("Chunker", "Token", "Missing", "1"));

    let token = &state.rag_config["Chunker"].components["Token"];
    assert_eq!(token.config["Tokens"].value, json!(300));
    assert_eq!(token.config["Units"].value, json!("chars"));
}

#[test]
fn reset_needs_confirmation() {
    let mut state = SettingsState::default();
    state.request_reset(ResetMode::Documents);
    state.cancel_reset();
    assert!(state.confirm_reset().is_none());
    state.request_reset(ResetMode::All);
    assert_eq!(state.confirm_reset(), Some(ResetMode::All));
    assert!(state.pending_reset.is_none());
}

#[test]
fn suggestion_paging_and_removal() {
    let mut state = SettingsState::default();
    state.apply_suggestion_page(AllSuggestionsResponse {
        suggestions: vec![
            Suggestion { query: "a".into(), timestamp: String::new(), uuid: "s1".into() },
            Suggestion { query: "b".into(), timestamp: String::new(), uuid: "s2".into() },
        ],
        total_count: 41,
    });
    assert_eq!(state.suggestion_page_count(), 3);
    assert!(state.next_suggestion_page());
    assert!(state.next_suggestion_page());
    assert!(!state.next_suggestion_page());
    assert!(state.remove_suggestion("s1"));
    assert!(!state.remove_suggestion("s1"));
    assert_eq!(state.suggestion_total, 40);
}

#[test]
fn disconnect_clears_backend_state() {
    let mut state = connected();
    state.disconnect();
    assert!(!state.connected);
    assert!(state.rag_config.is_empty());
}

#[test]
fn edit_component_setting_works_on_detached_configs() {
    let mut config = sample_config();
    assert!(edit_component_setting(&mut config, "Chunker", "Token", "Tokens", "128"));
    assert_eq!(config["Chunker"].components["Token"].config["Tokens"].value, json!(128));
    assert!(!edit_component_setting(&mut config, "Chunker", "Token", "Tokens", "12.5x"));
}
