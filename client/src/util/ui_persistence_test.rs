use super::*;

#[test]
fn keys_are_namespaced() {
    assert_eq!(Preference::DarkMode.key(), "verba.dark_mode");
}

#[test]
fn decode_reads_stored_json() {
    assert_eq!(decode::<bool>(Some("true")), Some(true));
    assert_eq!(decode::<bool>(Some("maybe")), None);
    assert_eq!(decode::<bool>(None), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn load_is_unset_outside_browser() {
    save(Preference::DarkMode, &true);
    assert_eq!(load::<bool>(Preference::DarkMode), None);
}
