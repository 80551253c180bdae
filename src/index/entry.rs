//! Index entry types.
//!
//! These are serialized to JSON as the index document consumed by the
//! search engine (and any external search UI).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which collection an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Article,
    Post,
}

/// One record in the index document.
///
/// Every field except `type` and `slug` may be an empty string or empty
/// array, never null: posts carry no title, description, or category, and
/// an article with an unknown category gets an empty display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Unique per language; translations share a slug.
    pub slug: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Publish timestamp, ISO 8601 on the wire.
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,

    #[serde(default)]
    pub category: String,

    /// Display label resolved from the category table.
    #[serde(rename = "categoryName", default)]
    pub category_name: String,

    pub lang: String,

    /// Truncated article body or post preview.
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> IndexEntry {
        IndexEntry {
            kind: EntryKind::Article,
            slug: "hello".into(),
            title: "Hello".into(),
            description: "An article".into(),
            tags: vec!["rust".into()],
            published_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            category: "tech".into(),
            category_name: "Technology".into(),
            lang: "en".into(),
            body: "Body".into(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["type"], "article");
        assert_eq!(json["publishedAt"], "2024-01-15T00:00:00Z");
        assert_eq!(json["categoryName"], "Technology");
        assert!(json.get("kind").is_none());
        assert!(json.get("published_at").is_none());
    }

    #[test]
    fn test_kind_lowercase() {
        assert_eq!(
            serde_json::to_string(&EntryKind::Post).unwrap(),
            "\"post\""
        );
        assert_eq!(
            serde_json::from_str::<EntryKind>("\"article\"").unwrap(),
            EntryKind::Article
        );
    }

    #[test]
    fn test_round_trip() {
        let entry = sample();
        let json = serde_json::to_string(&entry).unwrap();
        let back: IndexEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        // External producers may omit empty fields; consumers must still
        // see empty strings/arrays rather than an error.
        let json = r#"{
            "type": "post",
            "slug": "note",
            "publishedAt": "2024-03-01T12:00:00Z",
            "lang": "en"
        }"#;
        let entry: IndexEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.kind, EntryKind::Post);
        assert_eq!(entry.title, "");
        assert!(entry.tags.is_empty());
        assert_eq!(entry.category_name, "");
    }
}
