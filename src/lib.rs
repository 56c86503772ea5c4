//! driverlog library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind them: storage, domain logic and the request/response layer.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;
pub mod web;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::User { .. } => commands::user::handle(&cli.command, cfg),
        Commands::Role => commands::reference::handle_roles(),
        Commands::Warehouse { .. } => commands::reference::handle_warehouse(&cli.command, cfg),
        Commands::Bank { .. } => commands::reference::handle_bank(&cli.command, cfg),
        Commands::Profile { .. } => commands::profile::handle(&cli.command, cfg),
        Commands::Login { .. } => commands::session::login(&cli.command, cfg),
        Commands::Logout => commands::session::logout(cfg),
        Commands::Whoami => commands::session::whoami(cfg),
        Commands::Jobrun { .. } => commands::jobrun::handle(&cli.command, cfg),
        Commands::Mileage { .. } => commands::mileage::handle(&cli.command, cfg),
        Commands::Request { .. } => commands::request::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db overrides the database and its media folder
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg = cfg.with_database(custom_db);
    }
    log::debug!("database: {}", cfg.database);

    dispatch(&cli, &cfg)
}
