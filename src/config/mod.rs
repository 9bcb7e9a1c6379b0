//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Owner metadata (title, email, url)               |
//! | `[build]`   | Content/asset/output paths, minify, clean        |
//! | `[hero]`    | Typewriter lines, cursor, scroll prompt          |
//! | `[panel]`   | Default reading-list sort, panel timings         |
//! | `[serve]`   | Development server (port, interface, watch)      |
//! | `[extra]`   | User-defined custom fields                       |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Alex Chen"
//! description = "Software engineer crafting human-first tech"
//! email = "alex@chen.dev"
//!
//! [panel]
//! sort = "category"
//!
//! [[hero.lines]]
//! text = "// Building things that think and feel."
//! speed = 60
//! pause = 500
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod handle;
mod hero;
mod panel;
mod serve;

pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};
pub use hero::HeroLine;

use base::BaseConfig;
use build::BuildConfig;
use hero::HeroConfig;
use panel::PanelConfig;
use serve::ServeConfig;

use crate::{
    cli::{Cli, Commands},
    utils::category::normalize_path,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub hero: HeroConfig,

    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_toml(&content)
    }

    /// Load, apply CLI overrides and validate for the current command.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = Self::cli_root(cli);
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);

        match (cli.is_init(), config.config_path.exists()) {
            (true, true) => {
                bail!("Config file already exists. Remove it manually or init in a different path.")
            }
            (false, false) => bail!(
                "Config file not found: {}. Run `folio init` first.",
                config.config_path.display()
            ),
            _ => {}
        }

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Root requested on the command line, including `init <NAME>`.
    fn cli_root(cli: &Cli) -> PathBuf {
        let base = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = match (&cli.root, &cli.command) {
            (None, Commands::Init { name: None }) => self.get_root().to_owned(),
            _ => Self::cli_root(cli),
        };
        self.update_path_with_root(cli, &root);

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            self.build.clean |= args.clean;
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.trim_end_matches('/').to_string());
            }
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            self.base.url = Some(format!(
                "http://{}:{}",
                self.serve.interface, self.serve.port
            ));
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against the root and make it absolute.
    fn update_path_with_root(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = normalize_path(root);
        self.set_root(&root);

        self.config_path = normalize_path(&root.join(&cli.config));
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.assets = normalize_path(&root.join(&self.build.assets));
        self.build.output = normalize_path(&root.join(&self.build.output));
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::invalid("base.url", "must start with http:// or https://"));
        }

        if let Some(index) = self.hero.lines.iter().position(|line| line.speed == 0) {
            bail!(ConfigError::invalid(
                "hero.lines",
                format!("entry {} must have speed > 0", index + 1)
            ));
        }

        if self.panel.clock_interval_ms == 0 {
            bail!(ConfigError::invalid("panel.clock_interval_ms", "must be > 0"));
        }

        self.serve.ip()?;

        if self.build.output == self.get_root() {
            bail!(ConfigError::invalid("build.output", "must not be the project root"));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
