use super::*;

fn key(segments: &[&str]) -> QueryKey {
    QueryKey::new(segments.iter().copied())
}

#[test]
fn missing_then_fresh_then_stale_by_age() {
    let mut cache = QueryCache::new();
    let k = key(&["documents", "page", "1"]);
    assert_eq!(cache.lookup(&k, 0.0, 100.0), Lookup::Missing);

    cache.insert(k.clone(), 7, 1_000.0);
    assert_eq!(cache.lookup(&k, 1_050.0, 100.0), Lookup::Fresh(&7));
    assert_eq!(cache.lookup(&k, 1_100.0, 100.0), Lookup::Stale(&7));
}

#[test]
fn invalidate_marks_prefix_matches_only() {
    let mut cache = QueryCache::new();
    cache.insert(key(&["documents", "page", "1"]), 1, 0.0);
    cache.insert(key(&["documents", "detail", "u1"]), 2, 0.0);
    cache.insert(key(&["labels"]), 3, 0.0);

    assert_eq!(cache.invalidate(&[keys::documents()]), 2);
    assert_eq!(cache.lookup(&key(&["documents", "page", "1"]), 1.0, 1e9), Lookup::Stale(&1));
    assert_eq!(cache.lookup(&key(&["documents", "detail", "u1"]), 1.0, 1e9), Lookup::Stale(&2));
    assert_eq!(cache.lookup(&keys::labels(), 1.0, 1e9), Lookup::Fresh(&3));
}

#[test]
fn prefix_matching_is_segment_wise() {
    assert!(key(&["documents", "page"]).starts_with(&key(&["documents"])));
    assert!(!key(&["documentsX"]).starts_with(&key(&["documents"])));
    assert!(!key(&["documents"]).starts_with(&key(&["documents", "page"])));
    assert!(key(&["a"]).starts_with(&key(&[])));
}

#[test]
fn reinsert_clears_invalidation() {
    let mut cache = QueryCache::new();
    let k = key(&["meta"]);
    cache.insert(k.clone(), "old", 0.0);
    cache.invalidate(&[k.clone()]);
    cache.insert(k.clone(), "new", 5.0);
    assert_eq!(cache.lookup(&k, 6.0, 100.0), Lookup::Fresh(&"new"));
}

#[test]
fn mutation_success_invalidates_declared_keys() {
    let mut cache = QueryCache::new();
    cache.insert(keys::document_page("", &[], 1), 1, 0.0);
    cache.insert(keys::suggestion_page(1), 2, 0.0);
    let delete_document = Mutation::invalidating([keys::documents(), keys::labels()]);
    assert_eq!(cache.apply_mutation_success(&delete_document), 1);
    assert_eq!(cache.lookup(&keys::suggestion_page(1), 1.0, 100.0), Lookup::Fresh(&2));
}

#[test]
fn remove_and_clear() {
    let mut cache = QueryCache::new();
    cache.insert(key(&["a"]), 1, 0.0);
    cache.insert(key(&["b"]), 2, 0.0);
    assert_eq!(cache.remove(&key(&["a"])), Some(1));
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn document_page_key_includes_filters() {
    let a = keys::document_page("rust", &["Doc".to_owned()], 2);
    let b = keys::document_page("rust", &[], 2);
    assert_ne!(a, b);
    assert!(a.starts_with(&keys::documents()));
}

#[tokio::test]
async fn cached_query_serves_fresh_entries_without_fetching() {
    let owner = leptos::prelude::Owner::new();
    owner.set();
    let cache = RwSignal::new(ResponseCache::new());
    let k = keys::labels();

    let first: Vec<String> = cached_query(cache, k.clone(), DEFAULT_STALE_MS, || async {
        Ok(vec!["Document".to_owned()])
    })
    .await
    .expect("first fetch");
    assert_eq!(first, vec!["Document".to_owned()]);

    let second: Vec<String> = cached_query(cache, k.clone(), DEFAULT_STALE_MS, || async {
        Err::<Vec<String>, _>("should not fetch".to_owned())
    })
    .await
    .expect("served from cache");
    assert_eq!(second, first);

    run_mutation(cache, Mutation::invalidating([keys::labels()]), || async { Ok(()) })
        .await
        .expect("mutation");
    let refetched: Result<Vec<String>, String> =
        cached_query(cache, k, DEFAULT_STALE_MS, || async { Err("refetch".to_owned()) }).await;
    assert_eq!(refetched, Err("refetch".to_owned()));
}
