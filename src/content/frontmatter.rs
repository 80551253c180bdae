//! TOML frontmatter parsing.
//!
//! Content files open with an optional `+++` fence:
//!
//! ```text
//! +++
//! title = "Hello"
//! tags = ["rust"]
//! published_at = "2024-01-15"
//! +++
//!
//! Body starts here.
//! ```
//!
//! A file without a fence is all body. A fence that never closes, or TOML
//! that fails to parse, is an error the caller handles by skipping the file.

use anyhow::{Result, bail};
use serde::Deserialize;

/// Frontmatter fence marker.
const FENCE: &str = "+++";

/// Metadata block shared by both collections.
///
/// Articles use every field; posts only carry `tags`, `published_at`,
/// `draft`, and `lang`. Unknown keys are ignored so stray fields in old
/// content never break a build.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publish date as a TOML string, `YYYY-MM-DD` or RFC 3339.
    pub published_at: Option<String>,
    #[serde(default)]
    pub draft: bool,
    pub lang: Option<String>,
}

/// A parsed content file: frontmatter plus raw markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDoc {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Parse a content file into frontmatter and body.
pub fn parse(source: &str) -> Result<RawDoc> {
    let Some(after_open) = strip_fence_line(source) else {
        // No fence: the whole file is body
        return Ok(RawDoc {
            frontmatter: Frontmatter::default(),
            body: source.to_owned(),
        });
    };

    let Some((frontmatter_src, body)) = split_at_closing_fence(after_open) else {
        bail!("Unclosed frontmatter fence");
    };

    // CRLF sources leave a trailing `\r` on the frontmatter slice
    let frontmatter: Frontmatter = toml::from_str(frontmatter_src.trim_end())?;
    Ok(RawDoc {
        frontmatter,
        body: body.to_owned(),
    })
}

/// Strip an opening `+++` line, returning the remainder.
///
/// The fence must be the very first line of the file.
fn strip_fence_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(FENCE)?;
    if rest.is_empty() {
        return Some(rest);
    }
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n')
}

/// Split content at the closing `+++` line.
///
/// Returns `(frontmatter, body)` where the body starts on the line after
/// the fence. The fence must stand on its own line.
fn split_at_closing_fence(rest: &str) -> Option<(&str, &str)> {
    // Frontmatter may be empty, with the closing fence as the first line
    if let Some(body) = strip_fence_line(rest) {
        return Some(("", body));
    }

    let mut search = 0;
    while let Some(found) = rest[search..].find("\n+++") {
        let fence_start = search + found;
        let after = &rest[fence_start + 1 + FENCE.len()..];

        let body = if after.is_empty() {
            Some("")
        } else if let Some(stripped) = after.strip_prefix("\r\n") {
            Some(stripped)
        } else {
            after.strip_prefix('\n')
        };

        if let Some(body) = body {
            return Some((&rest[..fence_start], body));
        }
        search = fence_start + 1 + FENCE.len();
    }
    None
}
