//! The search engine.
//!
//! Owns the query text, the index cache, and their synchronization with
//! the URL. The index is fetched once per engine lifetime through an
//! injected [`IndexSource`]; query edits filter the cached data and never
//! trigger another fetch.
//!
//! # State machine
//!
//! ```text
//! Idle ──ensure_loaded()──► Loading ──ok──► Ready (terminal)
//!                              │
//!                             err (≤ 3 attempts)
//!                              │
//!                              ▼
//!                        Idle (exhausted: stays unloaded, error reported)
//! ```
//!
//! Typing while the index is unavailable is fine: the query text updates
//! immediately and filtering simply yields nothing until `Ready`.

use super::{
    nav::NavigationLifecycle,
    query::apply_query,
    url_state::UrlBar,
};
use crate::index::IndexEntry;
use anyhow::{Context, Result, anyhow};
use std::{fs, path::PathBuf, sync::Arc};

/// Fetch attempts before the engine gives up on the index document.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

// ============================================================================
// Index Source
// ============================================================================

/// Where the index document comes from.
///
/// Injected so the engine can be driven by a file, an HTTP response body,
/// or a fixture in tests.
pub trait IndexSource {
    fn fetch(&self) -> Result<Vec<IndexEntry>>;
}

/// Index document on disk (the common case for CLI search).
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IndexSource for FileSource {
    fn fetch(&self) -> Result<Vec<IndexEntry>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid index document {}", self.path.display()))
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Explicit cache states, owned by the engine rather than a module global
/// so tests never leak state into each other.
#[derive(Debug, Clone, Default)]
pub enum IndexCache {
    #[default]
    Empty,
    Loading,
    Loaded(Arc<Vec<IndexEntry>>),
}

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Loading,
    Ready,
}

// ============================================================================
// Engine
// ============================================================================

/// Query state + cached index, synchronized with the URL bar.
pub struct SearchEngine<S, U> {
    source: S,
    url: U,
    cache: IndexCache,
    query: String,
    attempts: u32,
}

impl<S: IndexSource, U: UrlBar> SearchEngine<S, U> {
    pub fn new(source: S, url: U) -> Self {
        Self {
            source,
            url,
            cache: IndexCache::default(),
            query: String::new(),
            attempts: 0,
        }
    }

    /// Initialize query state from the URL (called once on mount).
    pub fn mount(&mut self) {
        if let Some(query) = self.url.read_query() {
            self.query = query;
        }
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the query and reflect it into the URL.
    ///
    /// A blank query removes the parameter instead of writing `q=`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        let trimmed = self.query.trim();
        self.url
            .write_query((!trimmed.is_empty()).then_some(self.query.as_str()));
    }

    /// Observable state.
    pub fn state(&self) -> EngineState {
        match self.cache {
            IndexCache::Empty => EngineState::Idle,
            IndexCache::Loading => EngineState::Loading,
            IndexCache::Loaded(_) => EngineState::Ready,
        }
    }

    /// Fetch the index if it is not cached yet.
    ///
    /// Retries up to [`MAX_FETCH_ATTEMPTS`] times across the engine
    /// lifetime; once exhausted every further call reports the failure
    /// without touching the source again.
    pub fn ensure_loaded(&mut self) -> Result<()> {
        if matches!(self.cache, IndexCache::Loaded(_)) {
            return Ok(());
        }
        if self.attempts >= MAX_FETCH_ATTEMPTS {
            return Err(anyhow!(
                "index fetch failed after {MAX_FETCH_ATTEMPTS} attempts"
            ));
        }

        self.cache = IndexCache::Loading;
        let mut last_err = None;

        while self.attempts < MAX_FETCH_ATTEMPTS {
            self.attempts += 1;
            match self.source.fetch() {
                Ok(data) => {
                    self.cache = IndexCache::Loaded(Arc::new(data));
                    return Ok(());
                }
                Err(err) => last_err = Some(err),
            }
        }

        self.cache = IndexCache::Empty;
        Err(last_err
            .unwrap_or_else(|| anyhow!("index fetch failed"))
            .context("Failed to load index document"))
    }

    /// Entries matching the current query, in index order.
    ///
    /// Empty while the index is not `Ready` or the query is blank.
    pub fn results(&self) -> Vec<&IndexEntry> {
        match &self.cache {
            IndexCache::Loaded(data) => apply_query(&self.query, data),
            _ => Vec::new(),
        }
    }

    /// Shared handle to the cached index, when loaded.
    pub fn index(&self) -> Option<Arc<Vec<IndexEntry>>> {
        match &self.cache {
            IndexCache::Loaded(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }
}

impl<S: IndexSource, U: UrlBar> NavigationLifecycle for SearchEngine<S, U> {
    /// Re-read the query parameter once the new URL is in place, so a
    /// navigation to `/search?q=...` pre-populates the input.
    fn on_navigation_complete(&mut self) {
        self.query = self.url.read_query().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::EntryKind;
    use crate::search::url_state::InMemoryUrlBar;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    fn entry(slug: &str, tags: &[&str], day: u32) -> IndexEntry {
        IndexEntry {
            kind: EntryKind::Post,
            slug: slug.into(),
            title: String::new(),
            description: String::new(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            published_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            category: String::new(),
            category_name: String::new(),
            lang: "en".into(),
            body: format!("body of {slug}"),
        }
    }

    struct StaticSource(Vec<IndexEntry>);

    impl IndexSource for StaticSource {
        fn fetch(&self) -> Result<Vec<IndexEntry>> {
            Ok(self.0.clone())
        }
    }

    /// Fails `failures` times, then succeeds; counts fetch calls.
    struct FlakySource<'a> {
        failures: u32,
        calls: &'a Cell<u32>,
    }

    impl IndexSource for FlakySource<'_> {
        fn fetch(&self) -> Result<Vec<IndexEntry>> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n <= self.failures {
                Err(anyhow!("network down"))
            } else {
                Ok(vec![entry("late", &[], 1)])
            }
        }
    }

    fn engine_with(
        entries: Vec<IndexEntry>,
    ) -> SearchEngine<StaticSource, InMemoryUrlBar> {
        SearchEngine::new(StaticSource(entries), InMemoryUrlBar::new())
    }

    #[test]
    fn test_idle_until_loaded() {
        let mut engine = engine_with(vec![entry("a", &[], 1)]);
        assert_eq!(engine.state(), EngineState::Idle);

        engine.ensure_loaded().unwrap();
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn test_typing_before_load_yields_nothing() {
        let mut engine = engine_with(vec![entry("a", &["rust"], 1)]);
        engine.set_query("#rust");

        // Query text is live, filtering is deferred
        assert_eq!(engine.query(), "#rust");
        assert!(engine.results().is_empty());

        engine.ensure_loaded().unwrap();
        assert_eq!(engine.results().len(), 1);
    }

    #[test]
    fn test_blank_query_empty_results_when_ready() {
        let mut engine = engine_with(vec![entry("a", &[], 1), entry("b", &[], 2)]);
        engine.ensure_loaded().unwrap();

        assert_eq!(engine.state(), EngineState::Ready);
        assert!(engine.results().is_empty());
    }

    #[test]
    fn test_query_synced_to_url() {
        let mut engine = engine_with(vec![]);
        engine.set_query("#tag1");

        assert_eq!(engine.url.search(), "q=%23tag1");
        assert_eq!(engine.url.read_query().as_deref(), Some("#tag1"));

        engine.set_query("");
        assert_eq!(engine.url.search(), "");
    }

    #[test]
    fn test_mount_prepopulates_from_url() {
        let source = StaticSource(vec![]);
        let url = InMemoryUrlBar::with_search("?q=%23tag1");
        let mut engine = SearchEngine::new(source, url);

        engine.mount();
        assert_eq!(engine.query(), "#tag1");
    }

    #[test]
    fn test_navigation_complete_rereads_url() {
        let mut engine = engine_with(vec![]);
        engine.set_query("before");

        // Host router swaps the URL underneath, then announces completion
        engine.url.write_query(Some("after"));
        engine.on_navigation_complete();
        assert_eq!(engine.query(), "after");

        engine.url.write_query(None);
        engine.on_navigation_complete();
        assert_eq!(engine.query(), "");
    }

    #[test]
    fn test_load_happens_once() {
        let calls = Cell::new(0);
        let source = FlakySource { failures: 0, calls: &calls };
        let mut engine = SearchEngine::new(source, InMemoryUrlBar::new());

        engine.ensure_loaded().unwrap();
        engine.ensure_loaded().unwrap();
        engine.set_query("late");
        engine.ensure_loaded().unwrap();

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_retry_then_success() {
        let calls = Cell::new(0);
        let source = FlakySource { failures: 2, calls: &calls };
        let mut engine = SearchEngine::new(source, InMemoryUrlBar::new());

        engine.ensure_loaded().unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn test_retries_exhausted_stays_unloaded() {
        let calls = Cell::new(0);
        let source = FlakySource { failures: 10, calls: &calls };
        let mut engine = SearchEngine::new(source, InMemoryUrlBar::new());

        assert!(engine.ensure_loaded().is_err());
        assert_eq!(calls.get(), MAX_FETCH_ATTEMPTS);
        assert_eq!(engine.state(), EngineState::Idle);

        // Further calls report the failure without hitting the source
        assert!(engine.ensure_loaded().is_err());
        assert_eq!(calls.get(), MAX_FETCH_ATTEMPTS);
        assert!(engine.results().is_empty());
    }

    #[test]
    fn test_results_preserve_index_order() {
        let mut engine = engine_with(vec![
            entry("newest", &["t"], 3),
            entry("middle", &["t"], 2),
            entry("oldest", &["t"], 1),
        ]);
        engine.ensure_loaded().unwrap();
        engine.set_query("#t");

        let slugs: Vec<_> = engine.results().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_file_source_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("search-index.json");
        let data = vec![entry("on-disk", &["io"], 1)];
        fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let mut engine = SearchEngine::new(FileSource::new(&path), InMemoryUrlBar::new());
        engine.ensure_loaded().unwrap();
        engine.set_query("#io");

        assert_eq!(engine.results().len(), 1);
        assert_eq!(engine.results()[0].slug, "on-disk");
    }

    #[test]
    fn test_file_source_missing_file_fails() {
        let mut engine = SearchEngine::new(
            FileSource::new("/no/such/search-index.json"),
            InMemoryUrlBar::new(),
        );
        assert!(engine.ensure_loaded().is_err());
    }
}
