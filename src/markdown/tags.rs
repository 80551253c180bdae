//! Trailing tag-line extraction.
//!
//! Posts may end with a line of `#tag` tokens instead of frontmatter tags:
//!
//! ```text
//! Finally got the espresso ratio right.
//!
//! #coffee #morning
//! ```
//!
//! When the last non-blank line consists solely of such tokens, it is
//! removed from the body and the tags are returned.

use super::Document;
use regex::Regex;
use std::sync::LazyLock;

/// A line that is nothing but `#word` tokens separated by whitespace.
static TAG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#\w+\s*)+$").unwrap());

/// Captures the word part of each `#word` token.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

/// Split a trailing tag line off a post body.
///
/// Returns the body without the tag line (and without the blank lines that
/// preceded it) plus the extracted tags. A body whose last line is not a
/// pure tag line comes back unchanged with no tags; trailing whitespace is
/// always stripped.
pub fn extract_trailing_tags(body: &str) -> (String, Vec<String>) {
    let trimmed = body.trim_end();
    if trimmed.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    let last = lines.last().map_or("", |l| l.trim());

    if !TAG_LINE_RE.is_match(last) {
        return (trimmed.to_owned(), Vec::new());
    }

    let tags = TAG_RE
        .captures_iter(last)
        .map(|c| c[1].to_owned())
        .collect();

    lines.pop();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    (lines.join("\n"), tags)
}

/// Pipeline stage: back-fill `meta.tags` from the trailing tag line.
///
/// Frontmatter tags win: when `meta.tags` is already populated the body is
/// left untouched and the tag line (if any) stays visible content.
pub fn extract_tag_line(mut doc: Document) -> Document {
    if !doc.meta.tags.is_empty() {
        return doc;
    }

    let (body, tags) = extract_trailing_tags(&doc.body);
    doc.body = body;
    doc.meta.tags = tags;
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::DocMeta;

    #[test]
    fn test_extracts_tag_line() {
        let (body, tags) = extract_trailing_tags("Hello world\n\n#foo #bar");
        assert_eq!(body, "Hello world");
        assert_eq!(tags, vec!["foo", "bar"]);
    }

    #[test]
    fn test_no_tag_line_unchanged() {
        let (body, tags) = extract_trailing_tags("Just text, no tags");
        assert_eq!(body, "Just text, no tags");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_single_tag() {
        let (body, tags) = extract_trailing_tags("Note to self.\n#todo");
        assert_eq!(body, "Note to self.");
        assert_eq!(tags, vec!["todo"]);
    }

    #[test]
    fn test_mixed_last_line_is_not_a_tag_line() {
        // Tags mixed with prose stay in the body
        let input = "Shipped it! #release today";
        let (body, tags) = extract_trailing_tags(input);
        assert_eq!(body, input);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_trailing_whitespace_tolerated() {
        let (body, tags) = extract_trailing_tags("Hello\n\n#one #two  \n\n  ");
        assert_eq!(body, "Hello");
        assert_eq!(tags, vec!["one", "two"]);
    }

    #[test]
    fn test_tag_line_only_body() {
        let (body, tags) = extract_trailing_tags("#lonely");
        assert_eq!(body, "");
        assert_eq!(tags, vec!["lonely"]);
    }

    #[test]
    fn test_blank_body() {
        let (body, tags) = extract_trailing_tags("   \n\n  ");
        assert_eq!(body, "");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_unicode_tags() {
        let (body, tags) = extract_trailing_tags("記録\n\n#日記 #雑記");
        assert_eq!(body, "記録");
        assert_eq!(tags, vec!["日記", "雑記"]);
    }

    #[test]
    fn test_hash_heading_not_extracted() {
        // "# Heading" has a space after the hash, so it is not a tag token
        let input = "Body text\n\n# Heading";
        let (body, tags) = extract_trailing_tags(input);
        assert_eq!(body, input);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_stage_backfills_when_empty() {
        let doc = Document::new("Hello\n\n#foo", DocMeta::default());
        let out = extract_tag_line(doc);
        assert_eq!(out.body, "Hello");
        assert_eq!(out.meta.tags, vec!["foo"]);
    }

    #[test]
    fn test_stage_respects_frontmatter_tags() {
        let meta = DocMeta {
            tags: vec!["explicit".into()],
            ..DocMeta::default()
        };
        let doc = Document::new("Hello\n\n#foo", meta);
        let out = extract_tag_line(doc);

        // Body untouched, frontmatter tags kept
        assert_eq!(out.body, "Hello\n\n#foo");
        assert_eq!(out.meta.tags, vec!["explicit"]);
    }
}
