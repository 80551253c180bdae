//! `[content]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

/// `[content]` section in plume.toml - collection locations and the
/// category display-label table.
///
/// # Example
/// ```toml
/// [content]
/// articles = "content/articles"
/// posts = "content/posts"
///
/// [content.categories]
/// tech = "Technology"
/// life = "Everyday Life"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentSection {
    /// Project root. Usually set from the CLI, not the config file.
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: Option<PathBuf>,

    /// Long-form articles directory.
    #[serde(default = "defaults::content::articles")]
    #[educe(Default = defaults::content::articles())]
    pub articles: PathBuf,

    /// Short-form posts directory.
    #[serde(default = "defaults::content::posts")]
    #[educe(Default = defaults::content::posts())]
    pub posts: PathBuf,

    /// Category slug -> display label.
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

impl ContentSection {
    /// Display label for a category slug.
    ///
    /// Unknown categories yield an empty label, never an error.
    pub fn category_label(&self, slug: &str) -> String {
        self.categories.get(slug).cloned().unwrap_or_default()
    }
}
