//! Client-style search: query language, engine, and URL synchronization.

pub mod engine;
pub mod nav;
pub mod query;
pub mod url_state;

pub use engine::{EngineState, FileSource, IndexSource, SearchEngine};
pub use nav::NavigationLifecycle;
pub use query::{Query, apply_query};
pub use url_state::{InMemoryUrlBar, UrlBar};
