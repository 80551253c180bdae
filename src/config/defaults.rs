//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> Option<String> {
        None
    }

    pub fn default_lang() -> String {
        "en".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn articles() -> PathBuf {
        "content/articles".into()
    }

    pub fn posts() -> PathBuf {
        "content/posts".into()
    }
}

// ============================================================================
// [index] Section Defaults
// ============================================================================

pub mod index {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn path() -> PathBuf {
        "search-index.json".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
