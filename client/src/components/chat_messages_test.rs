use super::*;

#[test]
fn stage_label_only_while_fetching() {
    assert_eq!(stage_label(FetchStage::Idle), None);
    assert_eq!(stage_label(FetchStage::Retrieving), Some("Retrieving chunks..."));
    assert_eq!(stage_label(FetchStage::Generating), Some("Generating answer..."));
}

#[test]
fn cache_badge_shows_distance_when_known() {
    let fresh = Message::system("answer");
    assert_eq!(cache_badge(&fresh), None);

    let cached = Message { cached: true, distance: Some(0.25), ..Message::system("answer") };
    assert_eq!(cache_badge(&cached).as_deref(), Some("cached (0.25)"));

    let cached_no_distance = Message { cached: true, ..Message::system("answer") };
    assert_eq!(cache_badge(&cached_no_distance).as_deref(), Some("cached"));
}
