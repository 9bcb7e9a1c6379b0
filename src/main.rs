//! Folio - A single-page developer portfolio generator.

mod build;
mod cli;
mod config;
mod contact;
mod content;
mod init;
mod logger;
mod preview;
mod render;
mod serve;
mod utils;
mod watch;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use preview::{PanelRequest, play_hero, show_panel};
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(SiteConfig::load(cli)?);
    let config = cfg();

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config),
        Commands::Serve { .. } => {
            build_site(&config)?;
            serve_site()
        }
        Commands::Preview { speed } => play_hero(&config, *speed),
        Commands::Panel {
            search,
            sort,
            expand,
        } => show_panel(
            &config,
            &PanelRequest {
                search: search.clone(),
                sort: *sort,
                expand: expand.clone(),
            },
        ),
        Commands::Contact => contact::run(&config),
    }
}
