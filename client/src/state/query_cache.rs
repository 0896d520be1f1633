//! Keyed response cache with staleness and prefix invalidation.
//!
//! DESIGN
//! ======
//! Keys are ordered string segments (`["documents", "page", "2"]`). A
//! mutation declares key prefixes it invalidates; matching entries are marked
//! stale rather than dropped, so a view can keep rendering the old value
//! while the next read refetches. Consistency is "eventually refetch":
//! nothing here coordinates concurrent fetches of the same key.
//!
//! Values are stored as `serde_json::Value` so one cache in context serves
//! every endpoint; `cached_query` converts at the edges.

#[cfg(test)]
#[path = "query_cache_test.rs"]
mod query_cache_test;

use std::collections::BTreeMap;
use std::future::Future;

use leptos::prelude::{RwSignal, Update, WithUntracked};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Default freshness window for read queries.
pub const DEFAULT_STALE_MS: f64 = 30_000.0;

/// Ordered cache key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` is a leading run of this key's segments.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

/// Result of a cache read.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, T> {
    Fresh(&'a T),
    /// Present but older than the window or invalidated; refetch.
    Stale(&'a T),
    Missing,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    value: T,
    fetched_at_ms: f64,
    invalidated: bool,
}

/// A write operation and the cached reads it makes outdated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mutation {
    pub invalidates: Vec<QueryKey>,
}

impl Mutation {
    #[must_use]
    pub fn invalidating(keys: impl IntoIterator<Item = QueryKey>) -> Self {
        Self { invalidates: keys.into_iter().collect() }
    }
}

#[derive(Clone, Debug)]
pub struct QueryCache<T> {
    entries: BTreeMap<QueryKey, Entry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<T> QueryCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, key: QueryKey, value: T, now_ms: f64) {
        self.entries.insert(key, Entry { value, fetched_at_ms: now_ms, invalidated: false });
    }

    #[must_use]
    pub fn lookup(&self, key: &QueryKey, now_ms: f64, stale_ms: f64) -> Lookup<'_, T> {
        let Some(entry) = self.entries.get(key) else {
            return Lookup::Missing;
        };
        if entry.invalidated || now_ms - entry.fetched_at_ms >= stale_ms {
            Lookup::Stale(&entry.value)
        } else {
            Lookup::Fresh(&entry.value)
        }
    }

    /// Mark every entry under any of `prefixes` stale. Returns how many
    /// entries were marked.
    pub fn invalidate(&mut self, prefixes: &[QueryKey]) -> usize {
        let mut marked = 0;
        for (key, entry) in &mut self.entries {
            if prefixes.iter().any(|p| key.starts_with(p)) {
                entry.invalidated = true;
                marked += 1;
            }
        }
        marked
    }

    pub fn apply_mutation_success(&mut self, mutation: &Mutation) -> usize {
        self.invalidate(&mutation.invalidates)
    }

    pub fn remove(&mut self, key: &QueryKey) -> Option<T> {
        self.entries.remove(key).map(|e| e.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Cache shared through context by every view.
pub type ResponseCache = QueryCache<serde_json::Value>;

/// Milliseconds since the epoch on the browser clock.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}

/// Serve `key` from the cache while fresh; otherwise run `fetch` and store
/// its result.
///
/// # Errors
///
/// Returns the error from `fetch`. Failures are never cached.
pub async fn cached_query<R, F, Fut>(
    cache: RwSignal<ResponseCache>,
    key: QueryKey,
    stale_ms: f64,
    fetch: F,
) -> Result<R, String>
where
    R: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, String>>,
{
    let hit = cache.with_untracked(|c| match c.lookup(&key, now_ms(), stale_ms) {
        Lookup::Fresh(value) => serde_json::from_value::<R>(value.clone()).ok(),
        Lookup::Stale(_) | Lookup::Missing => None,
    });
    if let Some(value) = hit {
        return Ok(value);
    }
    let value = fetch().await?;
    if let Ok(json) = serde_json::to_value(&value) {
        cache.update(|c| c.insert(key, json, now_ms()));
    }
    Ok(value)
}

/// Run a mutation and, on success, invalidate what it declares.
///
/// # Errors
///
/// Returns the error from `run`; nothing is invalidated on failure.
pub async fn run_mutation<R, F, Fut>(cache: RwSignal<ResponseCache>, mutation: Mutation, run: F) -> Result<R, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, String>>,
{
    let result = run().await?;
    cache.update(|c| {
        c.apply_mutation_success(&mutation);
    });
    Ok(result)
}

/// Well-known key prefixes.
pub mod keys {
    use super::QueryKey;

    #[must_use]
    pub fn documents() -> QueryKey {
        QueryKey::new(["documents"])
    }

    #[must_use]
    pub fn document_page(query: &str, labels: &[String], page: u32) -> QueryKey {
        let mut segments = vec!["documents".to_owned(), "page".to_owned(), page.to_string(), query.to_owned()];
        segments.extend(labels.iter().cloned());
        QueryKey::new(segments)
    }

    #[must_use]
    pub fn document(uuid: &str) -> QueryKey {
        QueryKey::new(["documents", "detail", uuid])
    }

    #[must_use]
    pub fn labels() -> QueryKey {
        QueryKey::new(["labels"])
    }

    #[must_use]
    pub fn suggestions() -> QueryKey {
        QueryKey::new(["suggestions"])
    }

    #[must_use]
    pub fn suggestion_page(page: u32) -> QueryKey {
        QueryKey::new(["suggestions".to_owned(), "page".to_owned(), page.to_string()])
    }

    #[must_use]
    pub fn config() -> QueryKey {
        QueryKey::new(["config"])
    }

    #[must_use]
    pub fn meta() -> QueryKey {
        QueryKey::new(["meta"])
    }
}
