use super::*;
use frames::api::VectorGroup;

#[test]
fn legend_pairs_groups_with_palette_colors() {
    let groups = VectorGroups {
        embedder: "MiniLM".into(),
        groups: vec![
            VectorGroup { name: "alpha.md".into(), chunks: vec![] },
            VectorGroup { name: "beta.pdf".into(), chunks: vec![] },
        ],
        dimensions: 384,
    };
    let rows = legend(&groups);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], ("alpha.md".to_owned(), group_color(0)));
    assert_eq!(rows[1].1, group_color(1));
    assert_ne!(rows[0].1, rows[1].1);
}
