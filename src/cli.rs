//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plume content indexer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: plume.toml)
    #[arg(short = 'C', long, default_value = "plume.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a new site skeleton
    Init {
        /// the name(path) of site directory, relative to `root`
        name: Option<PathBuf>,
    },

    /// Build the index document from both content collections
    Index {
        /// Pretty-print the JSON document
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        pretty: Option<bool>,
    },

    /// Evaluate a query against the index document
    Search {
        /// Query text: `#tag`, `@category`, or free text
        query: String,

        /// Show at most this many results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Serve the index document. Rebuild on change automatically
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_index(&self) -> bool {
        matches!(self.command, Commands::Index { .. })
    }
    pub const fn is_search(&self) -> bool {
        matches!(self.command, Commands::Search { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
