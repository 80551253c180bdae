//! Plume - a content indexer and search tool for markdown blogs.

use anyhow::{Result, bail};
use clap::Parser;
use plume::{
    cli::{Cli, Commands},
    config::{SiteConfig, cfg, init_config},
    index::{build_index, write_index},
    init::new_site,
    log,
    search::{FileSource, InMemoryUrlBar, SearchEngine},
    serve::serve_site,
};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(load_config(cli)?);

    match &cli.command {
        Commands::Init { name } => new_site(&cfg(), name.is_some()),
        Commands::Index { .. } => run_index(),
        Commands::Search { query, limit } => run_search(query, *limit),
        Commands::Serve { .. } => serve_site(),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Build the index document and write it to disk.
fn run_index() -> Result<()> {
    let c = cfg();
    let entries = build_index(&c);
    let path = write_index(&entries, &c)?;
    log!("index"; "{} entries -> {}", entries.len(), path.display());
    Ok(())
}

/// Evaluate a query against the index document and print matches.
fn run_search(query: &str, limit: Option<usize>) -> Result<()> {
    let c = cfg();

    // Build the document first when it does not exist yet
    let document = c.index_document_path();
    if !document.exists() {
        let entries = build_index(&c);
        write_index(&entries, &c)?;
    }

    let mut engine = SearchEngine::new(FileSource::new(&document), InMemoryUrlBar::new());
    engine.set_query(query);
    engine.ensure_loaded()?;

    let results = engine.results();
    if results.is_empty() {
        log!("search"; "no results for `{}`", engine.query());
        return Ok(());
    }

    log!("search"; "{} results for `{}`", results.len(), engine.query());
    for entry in results.iter().take(limit.unwrap_or(usize::MAX)) {
        let date = entry.published_at.format("%Y/%m/%d");
        let label = if entry.title.is_empty() {
            entry.body.lines().next().unwrap_or_default()
        } else {
            entry.title.as_str()
        };
        let tags = if entry.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", entry.tags.join(" #"))
        };
        log!("search"; "{date}  {} · {label}{tags}", entry.slug);
    }

    Ok(())
}
