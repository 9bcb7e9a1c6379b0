//! Building the site into the output directory.
//!
//! ```text
//! build_site()
//!     ├── prepare_output()   clean or create the output directory
//!     ├── build_page()       content/*.toml → index.html + _data/catalog.json
//!     └── copy_assets()      assets/** → output/** (parallel, skips fresh files)
//! ```

use crate::{
    config::SiteConfig,
    content::SiteContent,
    log,
    logger::ProgressBars,
    render::{catalog_json, render_page},
    utils::minify::minify_page,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// Files never copied from the assets directory.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Output-relative path of the machine-readable content export.
pub const DATA_FILE: &str = "_data/catalog.json";

/// Output files written by `build_page`; assets never overwrite them.
const GENERATED_FILES: &[&str] = &["index.html", DATA_FILE];

fn is_generated(relative: &Path) -> bool {
    GENERATED_FILES.iter().any(|file| relative == Path::new(file))
}

/// Build the whole site.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    build_page(config)?;
    copy_assets(config)?;

    log_build_result(output)
}

/// Load content, render the page and write it with the data export.
///
/// This is the part watch mode repeats when config or content changes.
pub fn build_page(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let content = SiteContent::load(&config.build.content)
        .with_context(|| format!("Failed to load content from {}", config.build.content.display()))?;

    let html = render_page(config, &content);
    let html = minify_page(html.as_bytes(), config);
    write_file(&output.join("index.html"), &html)?;

    let data = catalog_json(&content, !config.build.minify)?;
    write_file(&output.join(DATA_FILE), &data)?;

    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

/// Create the output directory, removing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

// ============================================================================
// Assets
// ============================================================================

fn copy_assets(config: &SiteConfig) -> Result<()> {
    let files = collect_all_files(&config.build.assets);
    let clean = config.build.clean;
    let progress = ProgressBars::new_filtered(&[("assets", files.len())]);
    let has_error = AtomicBool::new(false);

    let result = files.par_iter().try_for_each(|path| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = copy_asset(path, config, clean, false) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", path.display(), e);
            }
            return Err(anyhow!("Build failed"));
        }
        if let Some(progress) = &progress {
            progress.inc_by_name("assets");
        }
        Ok(())
    });

    if let Some(progress) = progress {
        progress.finish();
    }
    result
}

/// Copy one asset to the same relative path under the output directory.
pub fn copy_asset(path: &Path, config: &SiteConfig, clean: bool, log_file: bool) -> Result<()> {
    let relative = path
        .strip_prefix(&config.build.assets)
        .map_err(|_| anyhow!("File is not in assets directory: {}", path.display()))?;
    if is_generated(relative) {
        log!("warn"; "skipping asset {}: the page build writes that file", relative.display());
        return Ok(());
    }
    let dest = config.build.output.join(relative);

    if !clean && is_up_to_date(path, &dest) {
        return Ok(());
    }
    if log_file {
        log!("assets"; "{}", relative.display());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(())
}

/// Every regular file under `dir`, recursively. A missing `dir` yields nothing.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Whether `dst` exists and is at least as new as `src`.
fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let modified = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (modified(src), modified(dst)) {
        (Some(src), Some(dst)) => src <= dst,
        _ => false,
    }
}

fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();
    if file_count == 0 {
        log!("warn"; "output is empty");
    } else {
        log!("build"; "done → {}", output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> SiteConfig {
        let root = dir.path();
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.build.content = root.join("content");
        config.build.assets = root.join("assets");
        config.build.output = root.join("public");
        config.base.title = "Alex Chen".into();
        config
    }

    #[test]
    fn test_build_writes_page_and_data() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        build_site(&config).unwrap();

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("<title>Alex Chen</title>"));
        assert!(html.contains("Designing for the Mind"));
        assert!(config.build.output.join(DATA_FILE).is_file());
    }

    #[test]
    fn test_build_minified_is_smaller() {
        let dir = TempDir::new().unwrap();
        let mut config = site(&dir);

        config.build.minify = false;
        build_page(&config).unwrap();
        let plain = fs::metadata(config.build.output.join("index.html")).unwrap().len();

        config.build.minify = true;
        build_page(&config).unwrap();
        let minified = fs::metadata(config.build.output.join("index.html")).unwrap().len();

        assert!(minified < plain);
    }

    #[test]
    fn test_build_copies_assets() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        fs::create_dir_all(config.build.assets.join("img")).unwrap();
        fs::write(config.build.assets.join("img/avatar.png"), b"png").unwrap();
        fs::write(config.build.assets.join(".DS_Store"), b"junk").unwrap();

        build_site(&config).unwrap();

        assert_eq!(fs::read(config.build.output.join("img/avatar.png")).unwrap(), b"png");
        assert!(!config.build.output.join(".DS_Store").exists());
    }

    #[test]
    fn test_clean_removes_stale_files() {
        let dir = TempDir::new().unwrap();
        let mut config = site(&dir);
        fs::create_dir_all(&config.build.output).unwrap();
        let stale = config.build.output.join("old.html");
        fs::write(&stale, "old").unwrap();

        build_site(&config).unwrap();
        assert!(stale.exists());

        config.build.clean = true;
        build_site(&config).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_assets_do_not_replace_generated_files() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        fs::create_dir_all(config.build.assets.join("_data")).unwrap();
        fs::write(config.build.assets.join("index.html"), "stale").unwrap();
        fs::write(config.build.assets.join(DATA_FILE), "{}").unwrap();
        fs::write(config.build.assets.join("_data/extra.json"), "[]").unwrap();

        build_site(&config).unwrap();

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("<title>Alex Chen</title>"));
        let data = fs::read_to_string(config.build.output.join(DATA_FILE)).unwrap();
        assert_ne!(data, "{}");
        assert_eq!(fs::read_to_string(config.build.output.join("_data/extra.json")).unwrap(), "[]");
    }

    #[test]
    fn test_is_generated() {
        assert!(is_generated(Path::new("index.html")));
        assert!(is_generated(Path::new("_data/catalog.json")));
        assert!(!is_generated(Path::new("blog/index.html")));
    }

    #[test]
    fn test_invalid_content_fails() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        fs::create_dir_all(&config.build.content).unwrap();
        fs::write(config.build.content.join("reading.toml"), "[[reading]]\nid = 1\n").unwrap();

        let err = build_site(&config).unwrap_err();
        assert!(format!("{err:#}").contains("reading.toml"));
    }

    #[test]
    fn test_copy_asset_outside_assets_dir() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        assert!(copy_asset(Path::new("/etc/hosts"), &config, false, false).is_err());
    }

    #[test]
    fn test_is_up_to_date() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, "a").unwrap();
        assert!(!is_up_to_date(&src, &dst));
        fs::write(&dst, "a").unwrap();
        assert!(is_up_to_date(&src, &dst));
    }

    #[test]
    fn test_collect_missing_dir() {
        assert!(collect_all_files(Path::new("/no/such/assets")).is_empty());
    }
}
