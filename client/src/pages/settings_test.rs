use super::*;

#[test]
fn reset_effects_by_mode() {
    assert!(reset_clears_documents(ResetMode::All));
    assert!(reset_clears_documents(ResetMode::Documents));
    assert!(!reset_clears_documents(ResetMode::Suggestions));
    assert!(reset_reloads_config(ResetMode::Config));
    assert!(!reset_reloads_config(ResetMode::Documents));
}

#[test]
fn every_reset_mode_has_a_description() {
    for mode in ResetMode::ALL_MODES {
        assert!(reset_description(mode).ends_with('?'));
    }
}

#[test]
fn save_requests_carry_credentials() {
    let mut settings = SettingsState::default();
    settings.credentials.url = "http://weaviate:8080".into();
    settings.theme_config.themes.insert("Light".into(), frames::Theme::default());

    let rag = rag_save_request(&settings);
    assert_eq!(rag.credentials.url, "http://weaviate:8080");

    let theme = theme_save_request(&settings);
    assert!(theme.themes.contains_key("Light"));
    assert_eq!(theme.credentials, settings.credentials);
}

#[test]
fn suggestion_page_request_uses_fixed_page_size() {
    let mut settings = SettingsState { suggestion_total: 100, ..SettingsState::default() };
    settings.next_suggestion_page();
    let request = suggestion_page_request(&settings);
    assert_eq!(request.page, 2);
    assert_eq!(request.page_size, SUGGESTION_PAGE_SIZE);
}
