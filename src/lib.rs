//! rdispatch library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

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
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            c::auth::handle(&cli.command, cfg)
        }
        Commands::Tenant { .. } => c::tenant::handle(&cli.command, cfg),
        Commands::Driver { .. } => c::driver::handle(&cli.command, cfg),
        Commands::Queue { .. } => c::queue::handle(&cli.command, cfg),
        Commands::Exit { .. } => c::exit::handle(&cli.command, cfg),
        Commands::Board | Commands::Watch { .. } => c::board::handle(&cli.command, cfg),
        Commands::History { .. } => c::history::handle(&cli.command, cfg),
        Commands::Report { .. } => c::report::handle(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
        Commands::Purge => c::purge::handle(cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db wins over the configured database
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    log::debug!("using database {}", cfg.database);
    dispatch(&cli, &cfg)
}
