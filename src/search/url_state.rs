//! URL query-parameter state.
//!
//! The current search query lives in the page URL's `q` parameter so
//! searches are linkable and survive navigation. This module owns the
//! encoding rules and the [`UrlBar`] seam the engine writes through; the
//! host environment (a browser shim, the dev server, tests) supplies the
//! actual storage.

/// Name of the query parameter.
const PARAM: &str = "q";

/// Read/write access to the page URL's search string.
///
/// Implementations hold only the search-string portion (`a=1&q=rust`),
/// without the leading `?`.
pub trait UrlBar {
    /// Current query text, decoded. `None` when the parameter is absent.
    fn read_query(&self) -> Option<String>;

    /// Set or remove the query parameter. `None` removes it, mirroring
    /// how a blank input clears the URL.
    fn write_query(&mut self, query: Option<&str>);
}

/// An in-memory search string, for tests and the server-side engine.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUrlBar {
    search: String,
}

impl InMemoryUrlBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing search string (leading `?` tolerated).
    pub fn with_search(search: &str) -> Self {
        Self {
            search: search.trim_start_matches('?').to_owned(),
        }
    }

    /// The raw search string.
    pub fn search(&self) -> &str {
        &self.search
    }
}

impl UrlBar for InMemoryUrlBar {
    fn read_query(&self) -> Option<String> {
        query_from_search(&self.search)
    }

    fn write_query(&mut self, query: Option<&str>) {
        self.search = search_with_query(&self.search, query);
    }
}

// ============================================================================
// Search-string Manipulation
// ============================================================================

/// Extract and decode the `q` parameter from a search string.
pub fn query_from_search(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("q=").or(if pair == PARAM { Some("") } else { None }))
        .map(decode_component)
}

/// Rewrite a search string with the `q` parameter set or removed.
///
/// Other parameters keep their order; `q` is appended at the end when set.
pub fn search_with_query(search: &str, query: Option<&str>) -> String {
    let mut params: Vec<String> = search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != PARAM && !pair.starts_with("q="))
        .map(str::to_owned)
        .collect();

    if let Some(query) = query {
        params.push(format!("{PARAM}={}", encode_component(query)));
    }

    params.join("&")
}

/// Percent-encode a parameter value.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Decode a percent-encoded parameter value.
///
/// Invalid sequences fall back to the raw text rather than erroring.
pub fn decode_component(value: &str) -> String {
    urlencoding::decode(value)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_hash_query() {
        let mut bar = InMemoryUrlBar::new();
        bar.write_query(Some("#tag1"));

        assert_eq!(bar.search(), "q=%23tag1");
        assert_eq!(bar.read_query().as_deref(), Some("#tag1"));
    }

    #[test]
    fn test_round_trip_unicode() {
        let mut bar = InMemoryUrlBar::new();
        bar.write_query(Some("日記 notes"));
        assert_eq!(bar.read_query().as_deref(), Some("日記 notes"));
    }

    #[test]
    fn test_absent_param_reads_none() {
        let bar = InMemoryUrlBar::with_search("?theme=dark");
        assert_eq!(bar.read_query(), None);
    }

    #[test]
    fn test_write_none_removes_param() {
        let mut bar = InMemoryUrlBar::with_search("?theme=dark&q=old");
        bar.write_query(None);

        assert_eq!(bar.search(), "theme=dark");
        assert_eq!(bar.read_query(), None);
    }

    #[test]
    fn test_other_params_preserved() {
        let mut bar = InMemoryUrlBar::with_search("a=1&b=2");
        bar.write_query(Some("rust"));

        assert_eq!(bar.search(), "a=1&b=2&q=rust");
        assert_eq!(bar.read_query().as_deref(), Some("rust"));
    }

    #[test]
    fn test_overwrite_existing_query() {
        let mut bar = InMemoryUrlBar::with_search("q=old&x=1");
        bar.write_query(Some("new value"));

        assert_eq!(bar.search(), "x=1&q=new%20value");
        assert_eq!(bar.read_query().as_deref(), Some("new value"));
    }

    #[test]
    fn test_bare_q_reads_empty() {
        assert_eq!(query_from_search("q").as_deref(), Some(""));
        assert_eq!(query_from_search("q=").as_deref(), Some(""));
    }

    #[test]
    fn test_leading_question_mark_tolerated() {
        assert_eq!(query_from_search("?q=%40cat").as_deref(), Some("@cat"));
    }

    #[test]
    fn test_invalid_percent_sequence_falls_back_raw() {
        assert_eq!(query_from_search("q=%ZZ").as_deref(), Some("%ZZ"));
    }

    #[test]
    fn test_empty_search_stays_empty() {
        assert_eq!(search_with_query("", None), "");
    }
}
