use super::*;

#[test]
fn pager_label_counts_pages() {
    let state = DocumentsState { total: 120, page: 2, ..DocumentsState::default() };
    assert_eq!(pager_label(&state), "Page 2 of 3 (120 documents)");
}

#[test]
fn pager_label_never_reports_zero_pages() {
    assert_eq!(pager_label(&DocumentsState::default()), "Page 1 of 1 (0 documents)");
}
