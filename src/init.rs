//! `folio init`: scaffold a new portfolio.
//!
//! ```text
//! <root>/
//! ├── folio.toml       default config
//! ├── content/         the embedded content, ready to edit
//! ├── assets/
//! └── .gitignore       ignores the output directory
//! ```

use crate::{config::SiteConfig, content::CONTENT_FILES, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const SITE_DIRS: &[&str] = &["content", "assets"];

/// Create a new site under the configured root.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name we scaffold into the current directory, which must be empty.
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(&config.config_path)?;
    init_content(&config.build.content)?;

    let output = config.build.output.strip_prefix(root).unwrap_or(&config.build.output);
    init_ignored_files(root, &[Path::new("/").join(output).as_path()])?;

    log!("init"; "created {}", root.display());
    Ok(())
}

fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the embedded content files so they can be edited.
fn init_content(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for file in CONTENT_FILES {
        let path = dir.join(file.name);
        fs::write(&path, file.default).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Write `.gitignore` and `.ignore` unless they exist.
pub fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let mut content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .collect::<Vec<_>>()
        .join("\n");
    content.push('\n');

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
