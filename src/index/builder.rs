//! Index construction.
//!
//! One pass over both collections produces the full index document:
//!
//! ```text
//! build_index()
//!     │
//!     ├── load_collection(articles) ──► article_entry() per file
//!     ├── load_collection(posts)    ──► post_entry() per file
//!     │
//!     └── merge + stable sort by published_at (newest first)
//! ```
//!
//! Drafts are dropped before the merge and never reach the document. The
//! index is rebuilt from scratch on every run; there is no incremental
//! path.

use super::entry::{EntryKind, IndexEntry};
use crate::{
    config::SiteConfig,
    content::{SourceFile, load_collection},
    log,
    markdown::{self, DocMeta, Document, preview::derive_preview},
    utils::{date::parse_published, git::Provenance},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::{fs, path::PathBuf};

/// Maximum characters of article body carried into the index document.
const ARTICLE_BODY_MAX_CHARS: usize = 500;

/// Build the index document from both collections.
///
/// Provenance is discovered once per build; entries without an explicit
/// publish date fall back to their first-commit time, then to now. The
/// now-fallback makes undated entries in non-versioned checkouts the one
/// nondeterministic input to an otherwise reproducible build.
pub fn build_index(config: &SiteConfig) -> Vec<IndexEntry> {
    let provenance = Provenance::discover(config.get_root());
    build_index_with(config, &provenance)
}

/// Build the index with an explicit provenance source (testable seam).
pub fn build_index_with(config: &SiteConfig, provenance: &Provenance) -> Vec<IndexEntry> {
    let articles = load_collection(&config.content.articles);
    let posts = load_collection(&config.content.posts);

    let mut entries: Vec<IndexEntry> = articles
        .iter()
        .filter_map(|file| article_entry(file, config, provenance))
        .chain(posts.iter().filter_map(|file| post_entry(file, config, provenance)))
        .collect();

    // Stable sort: entries with equal timestamps keep input order
    // (articles before posts, filename order within a collection).
    entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    entries
}

/// Serialize the index and write it to the configured location.
pub fn write_index(entries: &[IndexEntry], config: &SiteConfig) -> Result<PathBuf> {
    let json = if config.index.pretty {
        serde_json::to_string_pretty(entries)
    } else {
        serde_json::to_string(entries)
    }
    .context("Failed to serialize index")?;

    let path = config.index_document_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

// ============================================================================
// Entry Construction
// ============================================================================

/// Convert an article source file into an index entry.
///
/// Returns `None` for drafts.
fn article_entry(
    file: &SourceFile,
    config: &SiteConfig,
    provenance: &Provenance,
) -> Option<IndexEntry> {
    let fm = &file.doc.frontmatter;
    if fm.draft {
        return None;
    }

    let meta = DocMeta {
        title: fm.title.clone(),
        description: fm.description.clone(),
        tags: fm.tags.clone(),
        ..DocMeta::default()
    };
    let doc = markdown::run(
        Document::new(file.doc.body.clone(), meta),
        markdown::ARTICLE_STAGES,
    );

    let category = fm.category.clone().unwrap_or_default();
    let category_name = config.content.category_label(&category);

    Some(IndexEntry {
        kind: EntryKind::Article,
        slug: file.slug.clone(),
        title: doc.meta.title.unwrap_or_default(),
        description: doc.meta.description.unwrap_or_default(),
        tags: doc.meta.tags,
        published_at: resolve_published(file, provenance),
        category,
        category_name,
        lang: resolve_lang(file, config),
        body: truncate_chars(&doc.body, ARTICLE_BODY_MAX_CHARS),
    })
}

/// Convert a post source file into an index entry.
///
/// Posts have no title, description, or category; tags missing from
/// frontmatter are back-filled from the trailing tag line, and the body is
/// reduced to a preview to bound payload size.
fn post_entry(
    file: &SourceFile,
    config: &SiteConfig,
    provenance: &Provenance,
) -> Option<IndexEntry> {
    let fm = &file.doc.frontmatter;
    if fm.draft {
        return None;
    }

    let meta = DocMeta {
        tags: fm.tags.clone(),
        ..DocMeta::default()
    };
    let doc = markdown::run(
        Document::new(file.doc.body.clone(), meta),
        markdown::POST_STAGES,
    );

    Some(IndexEntry {
        kind: EntryKind::Post,
        slug: file.slug.clone(),
        title: String::new(),
        description: String::new(),
        tags: doc.meta.tags,
        published_at: resolve_published(file, provenance),
        category: String::new(),
        category_name: String::new(),
        lang: resolve_lang(file, config),
        body: derive_preview(&file.doc.body),
    })
}

// ============================================================================
// Field Resolution
// ============================================================================

/// Resolve an entry's language: filename suffix, then frontmatter, then
/// the site default.
fn resolve_lang(file: &SourceFile, config: &SiteConfig) -> String {
    file.filename_lang
        .clone()
        .or_else(|| file.doc.frontmatter.lang.clone())
        .unwrap_or_else(|| config.site.default_lang.clone())
}

/// Resolve an entry's publish timestamp.
///
/// Chain: explicit frontmatter value, first-commit time from provenance,
/// current time. The result is always concrete.
fn resolve_published(file: &SourceFile, provenance: &Provenance) -> DateTime<Utc> {
    if let Some(raw) = file.doc.frontmatter.published_at.as_deref() {
        if let Some(dt) = parse_published(raw) {
            return dt;
        }
        log!("warn"; "{}: unparseable published_at `{raw}`", file.path.display());
    }

    provenance
        .first_commit_time(&file.path)
        .unwrap_or_else(Utc::now)
}

/// Truncate to at most `max` characters, boundary safe.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        s.chars().take(max).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
