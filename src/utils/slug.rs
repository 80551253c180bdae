//! Slug and language derivation from content file names.
//!
//! A content file maps to a slug deterministically:
//!
//! | Source                              | slug             | lang        |
//! |-------------------------------------|------------------|-------------|
//! | `content/articles/hello.md`         | `hello`          | None        |
//! | `content/articles/hello.zh-tw.md`   | `hello`          | Some(zh-tw) |
//! | `content/posts/2024/coffee.md`      | `2024/coffee`    | None        |
//!
//! The trailing `.{lang}` component is authoritative: when present it
//! overrides any language declared in frontmatter. Translations of the same
//! document share a slug and differ only in language.

use anyhow::{Result, anyhow};
use std::path::Path;

/// Extensions recognized as markdown content.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Slug and optional language tag parsed from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugParts {
    /// Relative slug, unique per language within a collection.
    pub slug: String,
    /// Language tag from the `.{lang}` filename suffix, if any.
    pub lang: Option<String>,
}

/// Derive slug and language from a content file path.
///
/// Strips the collection directory prefix and the markdown extension, then
/// parses an optional trailing `.{lang}` component. Path separators are
/// normalized to `/` so slugs are stable across platforms.
///
/// # Errors
///
/// Returns an error if the path is not under `collection_dir`, is not
/// valid UTF-8, or does not carry a markdown extension.
pub fn slug_from_path(path: &Path, collection_dir: &Path) -> Result<SlugParts> {
    let relative = path
        .strip_prefix(collection_dir)
        .map_err(|_| anyhow!("File is not in collection directory: {}", path.display()))?
        .to_str()
        .ok_or_else(|| anyhow!("Invalid path encoding: {}", path.display()))?
        .replace('\\', "/");

    let stem = MARKDOWN_EXTENSIONS
        .iter()
        .find_map(|ext| relative.strip_suffix(&format!(".{ext}")))
        .ok_or_else(|| anyhow!("Not a markdown file: {}", path.display()))?;

    Ok(split_lang_suffix(stem))
}

/// Split a trailing `.{lang}` component off a file stem.
///
/// Only components that look like a language tag are treated as one, so
/// `notes.v2` keeps its dot while `notes.zh-tw` parses as a translation.
fn split_lang_suffix(stem: &str) -> SlugParts {
    if let Some((slug, suffix)) = stem.rsplit_once('.')
        && is_lang_tag(suffix)
        && !slug.is_empty()
    {
        return SlugParts {
            slug: slug.to_owned(),
            lang: Some(suffix.to_owned()),
        };
    }

    SlugParts {
        slug: stem.to_owned(),
        lang: None,
    }
}

/// Check whether a string looks like a BCP 47-ish language tag.
///
/// Accepts a 2-3 letter primary subtag with an optional 2-8 alphanumeric
/// subtag after a hyphen: `en`, `ja`, `zh-tw`, `zh-Hant`.
fn is_lang_tag(s: &str) -> bool {
    let (primary, rest) = match s.split_once('-') {
        Some((p, r)) => (p, Some(r)),
        None => (s, None),
    };

    let primary_ok =
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let rest_ok = rest.is_none_or(|r| {
        (2..=8).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
    });

    primary_ok && rest_ok
}
