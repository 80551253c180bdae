//! Site initialization module.
//!
//! Creates a new site skeleton: config file, collection directories, one
//! sample entry per collection, and a git repository so provenance dates
//! start working with the first commit.

use crate::{config::SiteConfig, log, utils::git};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "plume.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["content/articles", "content/posts"];

/// Sample article, demonstrating frontmatter and the category table.
const SAMPLE_ARTICLE: &str = "+++\ntitle = \"Hello, world\"\ndescription = \"A first article\"\ncategory = \"notes\"\ntags = [\"meta\"]\npublished_at = \"2024-01-01\"\n+++\n\nWelcome to your new site. Edit or delete this article.\n";

/// Sample post, demonstrating the trailing tag line.
const SAMPLE_POST: &str = "Short posts need no frontmatter at all.\n\n#meta\n";

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `plume init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_content(root)?;
    init_ignored_files(root, &[config.index.output.as_path(), Path::new(".DS_Store")])?;
    git::create_repo(root)?;

    log!("init"; "site created at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let mut config = SiteConfig::default();
    config
        .content
        .categories
        .insert("notes".into(), "Notes".into());

    let content = toml::to_string_pretty(&config)?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `plume init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write one sample entry per collection
fn init_sample_content(root: &Path) -> Result<()> {
    fs::write(root.join("content/articles/hello-world.md"), SAMPLE_ARTICLE)?;
    fs::write(root.join("content/posts/first-post.md"), SAMPLE_POST)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|&p| {
            // Output dir may already be absolute; ignore files want
            // root-relative entries
            p.strip_prefix(root).unwrap_or(p).to_str()
        })
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
