//! Content index: entry types and the builder that emits the index document.

pub mod builder;
pub mod entry;

pub use builder::{build_index, build_index_with, write_index};
pub use entry::{EntryKind, IndexEntry};
