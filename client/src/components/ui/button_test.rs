use super::*;

#[test]
fn variant_class_defaults_to_secondary() {
    assert_eq!(variant_class(None), "btn--secondary");
    assert_eq!(variant_class(Some("unknown")), "btn--secondary");
}

#[test]
fn variant_class_maps_known_variants() {
    assert_eq!(variant_class(Some("primary")), "btn--primary");
    assert_eq!(variant_class(Some("danger")), "btn--danger");
    assert_eq!(variant_class(Some("ghost")), "btn--ghost");
}
