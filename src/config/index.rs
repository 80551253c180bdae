//! `[index]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[index]` section in plume.toml - where the index document goes.
///
/// # Example
/// ```toml
/// [index]
/// output = "public"
/// path = "search-index.json"
/// pretty = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexSection {
    /// Output directory the server also serves static files from.
    #[serde(default = "defaults::index::output")]
    #[educe(Default = defaults::index::output())]
    pub output: PathBuf,

    /// Index document path, relative to `output`.
    #[serde(default = "defaults::index::path")]
    #[educe(Default = defaults::index::path())]
    pub path: PathBuf,

    /// Pretty-print the JSON document.
    #[serde(default)]
    pub pretty: bool,
}
