//! Git-backed provenance lookup.
//!
//! When an entry has no explicit publish date, we fall back to the date the
//! file first appeared in version history. Everything here is best-effort:
//! a missing repository, a detached state, or an unborn HEAD all degrade to
//! `None`, and the caller substitutes the current time.

use crate::utils::date::from_unix_seconds;
use chrono::{DateTime, Utc};
use gix::{Repository, ThreadSafeRepository};
use std::path::{Path, PathBuf};

/// Create a new git repository at the given path (used by `init`).
pub fn create_repo(root: &Path) -> anyhow::Result<ThreadSafeRepository> {
    let repo = gix::init(root)?;
    Ok(repo.into_sync())
}

/// Best-effort provenance source for a content tree.
///
/// Holds the discovered repository, or nothing when the content lives
/// outside version control (e.g. a tarball checkout on CI).
pub struct Provenance {
    repo: Option<ThreadSafeRepository>,
}

impl Provenance {
    /// Discover the repository containing `root`.
    ///
    /// Never fails: a missing repository just disables the lookup.
    pub fn discover(root: &Path) -> Self {
        let repo = gix::discover(root).ok().map(Repository::into_sync);
        Self { repo }
    }

    /// A provenance source with no repository (always returns `None`).
    pub fn unavailable() -> Self {
        Self { repo: None }
    }

    /// Whether a repository was found.
    pub fn is_available(&self) -> bool {
        self.repo.is_some()
    }

    /// The commit time of the earliest commit whose tree contains `path`.
    ///
    /// Walks history from HEAD and keeps the minimum commit time among
    /// commits that carry the file, which corresponds to the commit that
    /// introduced it (renames are not followed).
    pub fn first_commit_time(&self, path: &Path) -> Option<DateTime<Utc>> {
        let repo = self.repo.as_ref()?.to_thread_local();
        let relative = self.relative_to_workdir(&repo, path)?;

        let head_id = repo.head_id().ok()?;
        let walk = repo.rev_walk(Some(head_id.detach())).all().ok()?;

        let mut earliest: Option<i64> = None;
        for info in walk {
            let info = info.ok()?;
            let commit = info.object().ok()?;
            let tree = commit.tree().ok()?;

            if tree.lookup_entry_by_path(&relative).ok()?.is_some() {
                let seconds = commit.time().ok()?.seconds;
                earliest = Some(earliest.map_or(seconds, |e| e.min(seconds)));
            }
        }

        from_unix_seconds(earliest?)
    }

    /// Express `path` relative to the repository working directory.
    fn relative_to_workdir(&self, repo: &Repository, path: &Path) -> Option<PathBuf> {
        let root = repo.path().parent()?;
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        absolute.strip_prefix(&root).ok().map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unavailable_returns_none() {
        let provenance = Provenance::unavailable();
        assert!(!provenance.is_available());
        assert!(provenance.first_commit_time(Path::new("anything.md")).is_none());
    }

    #[test]
    fn test_discover_outside_repo() {
        // A fresh temp dir has no repository above it in practice, but even
        // if discovery walks up into one, a random missing file yields None.
        let dir = TempDir::new().unwrap();
        let provenance = Provenance::discover(dir.path());
        let missing = dir.path().join("no-such-file.md");
        assert!(provenance.first_commit_time(&missing).is_none());
    }

    #[test]
    fn test_discover_fresh_repo_unborn_head() {
        // An initialized repo without commits has an unborn HEAD; the
        // lookup must degrade to None rather than error.
        let dir = TempDir::new().unwrap();
        create_repo(dir.path()).unwrap();

        let file = dir.path().join("post.md");
        fs::write(&file, "hello").unwrap();

        let provenance = Provenance::discover(dir.path());
        assert!(provenance.is_available());
        assert!(provenance.first_commit_time(&file).is_none());
    }
}
