//! Reactive preference store.
//!
//! User preferences (currently the color theme) live in a small observable
//! store: a current value behind `ArcSwap` plus subscriber callbacks fired
//! on every change. Persistence goes through the [`StorageAdapter`] seam,
//! so the reactive layer never knows whether values land in browser
//! storage, a dotfile, or a test fixture.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};

/// Storage key for the theme preference.
const THEME_KEY: &str = "plume:theme";

// ============================================================================
// Storage Adapter
// ============================================================================

/// Key/value persistence for preferences.
pub trait StorageAdapter {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory storage, the default for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a value, as if a previous session had persisted it.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

// ============================================================================
// Observable Store
// ============================================================================

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// An observable value: `get`/`set` plus change subscriptions.
///
/// Reads are lock-free; `set` notifies subscribers synchronously on the
/// calling thread.
pub struct Store<T> {
    value: ArcSwap<T>,
    subscribers: Mutex<Vec<Subscriber<T>>>,
}

impl<T> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: ArcSwap::from_pointee(initial),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Current value.
    pub fn get(&self) -> Arc<T> {
        self.value.load_full()
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        let value = Arc::new(value);
        self.value.store(Arc::clone(&value));
        for subscriber in self.subscribers.lock().iter() {
            subscriber(&value);
        }
    }

    /// Register a change callback.
    ///
    /// The callback fires immediately with the current value, so new
    /// observers never miss the initial state.
    pub fn subscribe(&self, subscriber: impl Fn(&T) + Send + Sync + 'static) {
        subscriber(&self.get());
        self.subscribers.lock().push(Box::new(subscriber));
    }
}

// ============================================================================
// Theme Preference
// ============================================================================

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a persisted value. Unknown strings yield `None` so stale or
    /// corrupted storage falls back to the default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Preference stores wired to a storage adapter.
pub struct Preferences<S: StorageAdapter> {
    storage: Mutex<S>,
    pub theme: Store<Theme>,
}

impl<S: StorageAdapter> Preferences<S> {
    /// Load persisted preferences, defaulting what is missing or invalid.
    pub fn load(storage: S) -> Self {
        let theme = storage
            .load(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default();

        Self {
            storage: Mutex::new(storage),
            theme: Store::new(theme),
        }
    }

    /// Set and persist the theme.
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        self.storage.lock().save(THEME_KEY, theme.as_str());
    }

    /// Consume and return the storage adapter (to inspect persisted state).
    pub fn into_storage(self) -> S {
        self.storage.into_inner()
    }
}
