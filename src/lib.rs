//! Plume - content indexing and search for markdown blogs.
//!
//! Two cooperating pieces:
//!
//! - the **index builder** ([`index`]) scans two content collections
//!   (articles, posts), derives normalized metadata, and emits one flat
//!   JSON document ordered by publish date;
//! - the **search engine** ([`search`]) loads that document once, caches
//!   it, and evaluates a small query language (`#tag`, `@category`, free
//!   text) against it, keeping query state synchronized with a URL.
//!
//! Data flows one direction: markdown sources → builder → index document
//! → engine → result list. The JSON document is the sole contract between
//! the two, so either side can be replaced by an external consumer.

pub mod cli;
pub mod config;
pub mod content;
pub mod index;
pub mod init;
pub mod markdown;
pub mod prefs;
pub mod search;
pub mod serve;
pub mod utils;
pub mod watch;
