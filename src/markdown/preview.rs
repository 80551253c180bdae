//! Post preview derivation.
//!
//! List views and the index document carry a short excerpt of each post
//! instead of the full body, keeping the payload bounded.

use super::tags::extract_trailing_tags;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum preview length in characters, before the ellipsis marker.
pub const PREVIEW_MAX_CHARS: usize = 500;

/// Marker appended when the preview was truncated.
const ELLIPSIS: &str = "...";

/// A blank line separating paragraphs.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n\s*\r?\n").unwrap());

/// Derive the preview excerpt of a post body.
///
/// The trailing tag line is removed first, then the text is cut at the
/// first paragraph break. Previews longer than [`PREVIEW_MAX_CHARS`]
/// characters are truncated (character-boundary safe) and marked with an
/// ellipsis.
pub fn derive_preview(body: &str) -> String {
    let (cleaned, _) = extract_trailing_tags(body);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return String::new();
    }

    let first_paragraph = match PARAGRAPH_BREAK_RE.find(cleaned) {
        Some(m) => &cleaned[..m.start()],
        None => cleaned,
    };

    if first_paragraph.chars().count() <= PREVIEW_MAX_CHARS {
        return first_paragraph.to_owned();
    }

    let truncated: String = first_paragraph.chars().take(PREVIEW_MAX_CHARS).collect();
    format!("{}{ELLIPSIS}", truncated.trim_end())
}
