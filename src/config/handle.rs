//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so
//! the watcher thread can swap in a new `folio.toml` while the HTTP loop
//! keeps serving.
//!
//! ```text
//!   serve loop ──► cfg() ──┐
//!                          ├──► CONFIG (ArcSwap<SiteConfig>)
//!   watcher ──► reload_config() ─┘   (hash-gated atomic store)
//! ```

use super::SiteConfig;
use crate::utils::hash;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

// =============================================================================
// Global State
// =============================================================================

/// Initialized with the default config, replaced in `main`.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content behind `CONFIG`.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

// =============================================================================
// Public API
// =============================================================================

/// Current config. Wait-free; the `Arc` derefs to `&SiteConfig`.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Re-read `folio.toml` and swap it in.
///
/// Returns `Ok(false)` when the file content is unchanged. On a parse or
/// validation error the previous config stays active.
pub fn reload_config() -> Result<bool> {
    let c = cfg();
    let cli = c.cli.context("config was not loaded from the command line")?;

    let content = fs::read_to_string(&c.config_path)
        .with_context(|| format!("Failed to read {}", c.config_path.display()))?;
    let new_hash = hash::compute(content.as_bytes());
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;
    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

/// Install the startup config.
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read_to_string(&config.config_path) {
        CONFIG_HASH.store(hash::compute(content.as_bytes()), Ordering::Relaxed);
    }
    CONFIG.store(Arc::new(config));
}
