//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `plume.toml` during watch mode.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_index(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::{
    hash::{DefaultHasher, Hash, Hasher},
    sync::{Arc, LazyLock, atomic::AtomicU64},
};

// =============================================================================
// Global State
// =============================================================================

/// Global config storage with atomic replacement support.
///
/// Initialized with default config, then replaced with loaded config in main.
/// During watch mode, can be atomically replaced when plume.toml changes.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content at last load.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Public API
// =============================================================================

/// Get current config as `Arc<SiteConfig>`.
///
/// Lock-free read via atomic load; safe from rayon parallel contexts.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Replace config atomically (called when plume.toml changes).
///
/// Returns `true` if config was actually updated, `false` if content
/// matches the last load. Readers holding the old `Arc` stay valid.
///
/// # Errors
///
/// Returns error if plume.toml cannot be read or parsed.
pub fn reload_config() -> anyhow::Result<bool> {
    let c = cfg();
    let cli = c
        .cli
        .expect("CLI should be set in config during initialization");

    let content = std::fs::read_to_string(&c.config_path)?;
    let new_hash = content_hash(&content);

    let old_hash = CONFIG_HASH.load(std::sync::atomic::Ordering::Relaxed);
    if new_hash == old_hash {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;

    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, std::sync::atomic::Ordering::Relaxed);

    Ok(true)
}

/// Initialize global config (called once at startup).
///
/// This replaces the default config with the loaded one.
#[inline]
pub fn init_config(config: SiteConfig) {
    if config.config_path.exists()
        && let Ok(content) = std::fs::read_to_string(&config.config_path)
    {
        CONFIG_HASH.store(
            content_hash(&content),
            std::sync::atomic::Ordering::Relaxed,
        );
    }

    CONFIG.store(Arc::new(config));
}
