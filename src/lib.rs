//! polierlog library root.
//! Exposes the CLI parser, the high-level run() function and the
//! storage, calculation, report and export modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Project { .. } => c::project::handle(&cli.command, cfg),
        Commands::Asphalt { .. } => c::asphalt::handle(&cli.command, cfg),
        Commands::Material { .. } => c::material::handle(&cli.command, cfg),
        Commands::Worker { .. } => c::worker::handle(&cli.command, cfg),
        Commands::Hours { .. } => c::hours::handle(&cli.command, cfg),
        Commands::Vehicle { .. } => c::vehicle::handle(&cli.command, cfg),
        Commands::Trip { .. } => c::trip::handle(&cli.command, cfg),
        Commands::Catalog { .. } => c::catalog::handle(&cli.command, cfg),
        Commands::Usage { .. } => c::usage::handle(&cli.command, cfg),
        Commands::Calc { .. } => c::calc::handle(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Loaded once; `--db` overrides the configured file.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
