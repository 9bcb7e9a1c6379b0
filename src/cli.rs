//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use folio_core::{Section, SortKey};
use std::path::PathBuf;

/// Folio portfolio site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub content: Option<PathBuf>,

    /// Assets directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub assets: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Example:
    ///   folio build --base-url "https://alex.github.io/portfolio"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render the page into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the site. Rebuild on change automatically
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

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

    /// Play the hero reveal in the terminal
    Preview {
        /// Playback speed multiplier (2.0 plays twice as fast)
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },

    /// Open the navigation panel and print its contents
    Panel {
        /// Reading list search term
        #[arg(short, long)]
        search: Option<String>,

        /// Reading list order [date, category, status]
        #[arg(long)]
        sort: Option<SortKey>,

        /// Sections to expand [projects, reading, exploration]
        #[arg(long = "expand")]
        expand: Vec<Section>,
    },

    /// Copy the contact email to the clipboard
    Contact,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }

    /// Build flags of the current command, if it builds.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["folio", "build", "--clean", "--minify=false"]);
        let args = cli.build_args().unwrap();
        assert!(args.clean);
        assert_eq!(args.minify, Some(false));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
    }

    #[test]
    fn test_parse_minify_without_value() {
        let cli = Cli::parse_from(["folio", "serve", "-m", "-p", "8080"]);
        assert_eq!(cli.build_args().and_then(|a| a.minify), Some(true));
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, Some(8080)),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_panel_args() {
        let cli = Cli::parse_from([
            "folio", "panel", "-s", "clean", "--sort", "category", "--expand", "reading",
            "--expand", "projects",
        ]);
        match cli.command {
            Commands::Panel { search, sort, expand } => {
                assert_eq!(search.as_deref(), Some("clean"));
                assert_eq!(sort, Some(SortKey::Category));
                assert_eq!(expand, vec![Section::Reading, Section::Projects]);
            }
            _ => panic!("expected panel"),
        }
    }

    #[test]
    fn test_global_root_after_subcommand() {
        let cli = Cli::parse_from(["folio", "build", "-r", "site"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert!(cli.is_build());
    }

    #[test]
    fn test_rejects_unknown_section() {
        assert!(Cli::try_parse_from(["folio", "panel", "--expand", "blog"]).is_err());
    }
}
