//! rTimesheet library root.
//! Timesheet draft & submission engine plus the offline CLI around it.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Slots { .. } => cli::commands::slots::handle(&cli.command, cfg),
        Commands::Check { .. } => cli::commands::check::handle(&cli.command),
        Commands::Preview { .. } => cli::commands::preview::handle(&cli.command, cfg),
    }
}

/// Install the stderr tracing subscriber. RUST_LOG wins over the configured filter.
pub fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_filter.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let cfg = Config::load()?;
    init_tracing(&cfg);

    dispatch(&cli, &cfg)
}
