//! File watcher behind `folio serve`.
//!
//! ```text
//! notify events ──► Debouncer (300ms) ──► handle_changes()
//!                                           ├── folio.toml   reload config, render page
//!                                           ├── content/**   render page
//!                                           └── assets/**    copy changed files
//! ```
//!
//! A successful rebuild starts an 800ms cooldown so the burst of events an
//! editor produces while saving is not handled twice.

use crate::{
    build::{build_page, copy_asset},
    config::{SiteConfig, cfg, reload_config},
    log,
    logger::WatchStatus,
    utils::category::{FileCategory, categorize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Editor swap files, backups and dotfiles.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// `/site/content/reading.toml` → `content/reading.toml`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Change Handling
// =============================================================================

/// What a batch of changed paths asks for.
#[derive(Debug, Default, PartialEq, Eq)]
struct ChangeSet {
    config: bool,
    content: bool,
    assets: Vec<PathBuf>,
}

impl ChangeSet {
    fn classify(paths: &[PathBuf], config: &SiteConfig) -> Self {
        let mut changes = Self::default();
        for path in paths {
            match categorize_path(path, config) {
                FileCategory::Config => changes.config = true,
                FileCategory::Asset => changes.assets.push(path.clone()),
                category if category.rerenders() => changes.content = true,
                _ => {}
            }
        }
        changes.assets.sort();
        changes
    }

    const fn rerenders(&self) -> bool {
        self.config || self.content
    }

    fn is_empty(&self) -> bool {
        !self.rerenders() && self.assets.is_empty()
    }
}

/// Rebuild what `paths` touch. Returns true when something was rebuilt.
fn handle_changes(paths: &[PathBuf], status: &mut WatchStatus) -> bool {
    let changes = ChangeSet::classify(paths, &cfg());
    if changes.is_empty() {
        return false;
    }

    if changes.config {
        match reload_config() {
            Ok(true) => {}
            Ok(false) if !changes.content && changes.assets.is_empty() => {
                status.unchanged("folio.toml");
                return false;
            }
            Ok(false) => {}
            Err(e) => {
                status.error("folio.toml rejected", &format!("{e:#}"));
                return false;
            }
        }
    }

    // Loaded after a possible reload.
    let config = cfg();
    let root = config.get_root();
    let mut rebuilt = Vec::new();

    if changes.rerenders() {
        if let Err(e) = build_page(&config) {
            status.error("page build failed", &format!("{e:#}"));
            return false;
        }
        rebuilt.push("page".to_string());
    }

    for path in &changes.assets {
        if !path.is_file() {
            continue;
        }
        if let Err(e) = copy_asset(path, &config, true, false) {
            status.error(&format!("copy failed: {}", rel_path(path, root)), &format!("{e:#}"));
            return false;
        }
        rebuilt.push(rel_path(path, root));
    }

    if rebuilt.is_empty() {
        return false;
    }
    status.success(&format!("rebuilt {}", rebuilt.join(", ")));
    true
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let targets = [
        (&config.config_path, RecursiveMode::NonRecursive, FileCategory::Config),
        (&config.build.content, RecursiveMode::Recursive, FileCategory::Content),
        (&config.build.assets, RecursiveMode::Recursive, FileCategory::Asset),
    ];

    let root = config.get_root();
    let mut watched = Vec::new();
    for (path, mode, category) in targets {
        if !path.exists() {
            continue;
        }
        watcher
            .watch(path, mode)
            .with_context(|| format!("Failed to watch {}: {}", category.name(), path.display()))?;
        watched.push(rel_path(path, root));
    }

    if !watched.is_empty() {
        log!("watch"; "{}", watched.join(", "));
    }
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

/// Watch config, content and assets until the event channel closes.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut status) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
