use super::*;
use serde_json::json;

fn sample_config() -> RagConfig {
    serde_json::from_value(json!({
        "Generator": {
            "selected": "OpenAI",
            "components": {
                "OpenAI": {
                    "name": "OpenAI",
                    "description": "GPT models",
                    "type": "Generator",
                    "available": true,
                    "config": {
                        "Model": {"type": "dropdown", "value": "gpt-4o", "description": "", "values": ["gpt-4o", "gpt-4o-mini"]}
                    }
                },
                "Ollama": {"name": "Ollama", "available": false}
            }
        }
    }))
    .expect("config")
}

#[test]
fn partial_mock_config_still_parses() {
    let config: RagConfig = serde_json::from_value(json!({
        "generator": {"name": "OpenAI"},
        "reader": {"name": "BasicReader"}
    }))
    .expect("partial config");
    assert_eq!(config.len(), 2);
    assert!(config["generator"].selected.is_empty());
    assert!(config["generator"].selected_component().is_none());
}

#[test]
fn selected_component_resolves_by_name() {
    let config = sample_config();
    let generator = &config["Generator"];
    let selected = generator.selected_component().expect("selected");
    assert_eq!(selected.config["Model"].value, json!("gpt-4o"));
    assert_eq!(selected.kind, "Generator");
}

#[test]
fn select_refuses_unavailable_or_unknown_components() {
    let mut config = sample_config();
    let generator = config.get_mut("Generator").expect("generator");
    assert!(!generator.select("Ollama"));
    assert!(!generator.select("Missing"));
    assert!(!generator.select("OpenAI"));
    assert_eq!(generator.selected, "OpenAI");
}

#[test]
fn empty_theme_object_falls_back_to_defaults() {
    let theme: Theme = serde_json::from_value(json!({})).expect("theme");
    assert!(theme.intro_text().starts_with("Welcome to Verba"));
}

#[test]
fn theme_keeps_unknown_keys_on_round_trip() {
    let theme: Theme = serde_json::from_value(json!({
        "theme_name": "Dark",
        "intro_message": {"type": "text", "text": "Hi there", "description": ""},
        "primary_color": {"type": "color", "color": "#000000"}
    }))
    .expect("theme");
    assert_eq!(theme.intro_text(), "Hi there");
    let back = serde_json::to_value(&theme).expect("serialize");
    assert_eq!(back["primary_color"]["color"], "#000000");
    assert_eq!(back["theme_name"], "Dark");
}

#[test]
fn theme_config_select_switches_active_theme() {
    let mut dark = Theme::default();
    dark.theme_name = "Dark".into();
    let mut config = ThemeConfig::default();
    config.themes.insert("Dark".into(), dark);
    assert!(config.select("Dark"));
    assert_eq!(config.theme.theme_name, "Dark");
    assert!(!config.select("Neon"));
}
