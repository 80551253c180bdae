//! Site configuration management for `plume.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[site]`    | Site metadata (title, url, default language)   |
//! | `[content]` | Collection directories, category labels        |
//! | `[index]`   | Index document output location                 |
//! | `[serve]`   | Development server (port, interface, watch)    |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! description = "A personal blog"
//! default_lang = "en"
//!
//! [content]
//! articles = "content/articles"
//! posts = "content/posts"
//!
//! [content.categories]
//! tech = "Technology"
//!
//! [index]
//! output = "public"
//! path = "search-index.json"
//!
//! [serve]
//! port = 5277
//! ```

mod content;
pub mod defaults;
mod error;
pub mod handle;
mod index;
mod serve;
mod site;

pub use content::ContentSection;
pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};
pub use index::IndexSection;
pub use serve::ServeSection;
pub use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing plume.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteSection,

    /// Content collections
    #[serde(default)]
    pub content: ContentSection,

    /// Index document output
    #[serde(default)]
    pub index: IndexSection,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeSection,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load configuration for the given CLI invocation.
    ///
    /// Missing config files fall back to defaults; `update_with_cli` then
    /// resolves paths and applies flag overrides.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.content.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.content.root = Some(path.to_path_buf());
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Absolute path of the index document.
    pub fn index_document_path(&self) -> PathBuf {
        self.index.output.join(&self.index.path)
    }

    /// URL path the index document is served at (e.g. `/search-index.json`).
    pub fn index_url_path(&self) -> String {
        let rel = self.index.path.to_string_lossy().replace('\\', "/");
        format!("/{rel}")
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        // Determine the final root path based on command
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => {
                let base = cli
                    .root
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| self.get_root().to_owned());
                base.join(name)
            }
            _ => cli
                .root
                .as_ref()
                .cloned()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };

        self.set_root(&root);
        self.update_path_with_root(&root);

        match &cli.command {
            Commands::Index { pretty } => {
                Self::update_option(&mut self.index.pretty, pretty.as_ref());
            }
            Commands::Serve {
                interface,
                port,
                watch,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.content.articles = Self::normalize_path(&root.join(&self.content.articles));
        self.content.posts = Self::normalize_path(&root.join(&self.content.posts));
        self.index.output = Self::normalize_path(&root.join(&self.index.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if let Some(url) = &self.site.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.index.path.is_absolute() {
            bail!(ConfigError::Validation(
                "[index.path] must be relative to [index.output]".into()
            ));
        }

        if let Commands::Init { .. } = &self.get_cli().command
            && self.get_root().exists()
        {
            bail!("Path already exists");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
