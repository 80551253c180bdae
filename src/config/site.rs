//! `[site]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in plume.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// title = "My Blog"
/// description = "A personal blog about Rust"
/// url = "https://myblog.com"
/// default_lang = "en"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Site title.
    pub title: String,

    /// Site description.
    pub description: String,

    /// Base URL for absolute links.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// Language tag assigned to entries that declare none,
    /// neither in the filename nor in frontmatter.
    #[serde(default = "defaults::site::default_lang")]
    #[educe(Default = defaults::site::default_lang())]
    pub default_lang: String,
}
