//! Content collections: frontmatter parsing and directory scanning.

pub mod frontmatter;
pub mod loader;

pub use frontmatter::{Frontmatter, RawDoc};
pub use loader::{SourceFile, load_collection};
