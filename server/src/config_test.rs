use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_uses_defaults() {
    assert_eq!(ServerConfig::from_lookup(lookup(&[])), ServerConfig::default());
}

#[test]
fn variables_override_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("VERBA_MOCK_PORT", "9100"),
        ("VERBA_PRODUCTION", "Demo"),
        ("VERBA_GOOGLE_TAG", "G-123"),
        ("DEFAULT_DEPLOYMENT", "Weaviate"),
        ("VERBA_MOCK_TOKEN_DELAY_MS", "0"),
    ]));
    assert_eq!(config.port, 9100);
    assert!(config.is_demo());
    assert_eq!(config.google_tag, "G-123");
    assert_eq!(config.default_deployment, "Weaviate");
    assert_eq!(config.token_delay_ms, 0);
}

#[test]
fn unparsable_values_fall_back() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("VERBA_MOCK_PORT", "eighty"),
        ("VERBA_PRODUCTION", "Production"),
        ("DEFAULT_DEPLOYMENT", " "),
    ]));
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.production, Production::Local);
    assert_eq!(config.default_deployment, "Local");
}
