//! The query language.
//!
//! Three query shapes, chosen by the first character:
//!
//! | Input      | Meaning                                              |
//! |------------|------------------------------------------------------|
//! | `#rust`    | tag filter: substring match against each tag         |
//! | `@tech`    | category filter: substring match against the slug    |
//! | `anything` | free text: title, description, body, tags, category label |
//!
//! All matching is case-insensitive substring containment (tag queries
//! included, for consistency with the other filters). A blank query
//! matches nothing: the caller renders a hint, not "no results".

use crate::index::IndexEntry;

/// A parsed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Blank input; matches no entries.
    Empty,
    /// `#`-prefixed tag filter, lowercased.
    Tag(String),
    /// `@`-prefixed category filter, lowercased.
    Category(String),
    /// Free-text filter, lowercased.
    Text(String),
}

impl Query {
    /// Parse raw input into a query.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Some(tag) = trimmed.strip_prefix('#') {
            return Self::Tag(tag.to_lowercase());
        }
        if let Some(category) = trimmed.strip_prefix('@') {
            return Self::Category(category.to_lowercase());
        }
        Self::Text(trimmed.to_lowercase())
    }

    /// Whether an entry satisfies this query.
    pub fn matches(&self, entry: &IndexEntry) -> bool {
        match self {
            Self::Empty => false,
            Self::Tag(q) => entry.tags.iter().any(|t| t.to_lowercase().contains(q)),
            Self::Category(q) => entry.category.to_lowercase().contains(q),
            Self::Text(q) => {
                entry.title.to_lowercase().contains(q)
                    || entry.description.to_lowercase().contains(q)
                    || entry.body.to_lowercase().contains(q)
                    || entry.tags.iter().any(|t| t.to_lowercase().contains(q))
                    || entry.category_name.to_lowercase().contains(q)
            }
        }
    }
}

/// Filter an index by a raw query string.
///
/// Result order is the index order (publish date descending); filtering
/// never re-sorts. A blank query yields an empty result set.
pub fn apply_query<'a>(query: &str, index: &'a [IndexEntry]) -> Vec<&'a IndexEntry> {
    let query = Query::parse(query);
    if query == Query::Empty {
        return Vec::new();
    }
    index.iter().filter(|entry| query.matches(entry)).collect()
}
