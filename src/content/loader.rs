//! Collection scanning.
//!
//! Walks a collection directory, parses every markdown file in parallel,
//! and derives slug/language from the file name. A file that fails to read
//! or parse is logged and skipped; one bad entry never fails the build.

use super::frontmatter::{self, RawDoc};
use crate::{
    log,
    utils::slug::{SlugParts, slug_from_path},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A content file, parsed and located within its collection.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute source path (used for provenance lookup).
    pub path: PathBuf,
    /// Slug derived from the file name.
    pub slug: String,
    /// Language from the filename suffix, if present.
    pub filename_lang: Option<String>,
    /// Parsed frontmatter and body.
    pub doc: RawDoc,
}

/// Load every markdown file under a collection directory.
///
/// Files are discovered in sorted order (stable across platforms and
/// repeated runs) and parsed in parallel. A missing directory yields an
/// empty collection rather than an error, so a site with only posts and no
/// articles still builds.
pub fn load_collection(dir: &Path) -> Vec<SourceFile> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_markdown(p))
        .collect();

    files
        .par_iter()
        .filter_map(|path| match load_file(path, dir) {
            Ok(file) => Some(file),
            Err(err) => {
                log!("warn"; "skipping {}: {:#}", path.display(), err);
                None
            }
        })
        .collect()
}

/// Parse one content file.
fn load_file(path: &Path, collection_dir: &Path) -> Result<SourceFile> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let doc = frontmatter::parse(&source)
        .with_context(|| format!("Invalid frontmatter in {}", path.display()))?;

    let SlugParts { slug, lang } = slug_from_path(path, collection_dir)?;

    Ok(SourceFile {
        path: path.to_path_buf(),
        slug,
        filename_lang: lang,
        doc,
    })
}

/// Whether a path has a markdown extension.
fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext, "md" | "mdx"))
}
