//! File system watcher for live index rebuilds.
//!
//! Monitors both collection directories and the config file. Any change is
//! a full rebuild: the index has no incremental path, and a whole-site
//! rebuild is cheap enough that precision would buy nothing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Event Loop                          │
//! │                                                          │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│  handle_changes()  │  │
//! │  │ events   │    │ (300ms)  │    │  reload config,    │  │
//! │  └──────────┘    └──────────┘    │  rebuild index     │  │
//! │                                  └────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use crate::{
    config::{SiteConfig, cfg, reload_config},
    index::{IndexEntry, build_index, write_index},
    log,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Whether a changed path can affect the index.
fn is_relevant_path(path: &Path, config: &SiteConfig) -> bool {
    path == config.config_path
        || path.starts_with(&config.content.articles)
        || path.starts_with(&config.content.posts)
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Process changed paths. Returns true if a rebuild happened.
fn handle_changes(paths: &[PathBuf], on_rebuild: &impl Fn(Vec<IndexEntry>)) -> bool {
    let relevant: Vec<_> = {
        let c = cfg();
        paths.iter().filter(|p| is_relevant_path(p, &c)).collect()
    };
    if relevant.is_empty() {
        return false;
    }

    if relevant.iter().any(|p| **p == cfg().config_path) {
        match reload_config() {
            Ok(true) => log!("watch"; "config changed, reloaded"),
            Ok(false) => {}
            Err(e) => {
                log!("error"; "config reload failed: {e:#}");
                return false;
            }
        }
    }

    let c = cfg();
    log!("watch"; "{} changed, rebuilding index...", relevant.len());
    let entries = build_index(&c);
    match write_index(&entries, &c) {
        Ok(_) => {
            log!("watch"; "rebuilt, {} entries", entries.len());
            on_rebuild(entries);
            true
        }
        Err(e) => {
            log!("error"; "rebuild failed: {e:#}");
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let targets = [
        (&config.content.articles, RecursiveMode::Recursive),
        (&config.content.posts, RecursiveMode::Recursive),
        (&config.config_path, RecursiveMode::NonRecursive),
    ];

    let mut watched = Vec::new();
    for (path, mode) in targets {
        if path.exists() {
            watcher
                .watch(path, mode)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
            watched.push(relative_display(path, config.get_root()));
        }
    }

    log!("watch"; "watching: {}", watched.join(", "));
    Ok(())
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
///
/// `on_rebuild` receives each freshly built index (the server swaps its
/// in-memory copy there).
pub fn watch_for_changes_blocking(on_rebuild: impl Fn(Vec<IndexEntry>)) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &cfg())?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &on_rebuild) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    Ok(())
}
