//! Spendcast CLI - Spending forecasts by category
//!
//! Usage:
//!   spendcast init                          Initialize database
//!   spendcast users add --name A --income N Add a user
//!   spendcast import --user 1 --file CSV    Import a ledger
//!   spendcast forecast --user 1 --months 3  Forecast spending

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                UsersAction::Add { name, income } => {
                    commands::cmd_users_add(&db, &name, income).map(|_| ())
                }
                UsersAction::List => commands::cmd_users_list(&db),
            }
        }
        Commands::Categories => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_categories(&db)
        }
        Commands::Import { user, file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, user, &file).map(|_| ())
        }
        Commands::History { user, format } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let mut out = std::io::stdout().lock();
            commands::cmd_history(&db, user, format, &mut out)
        }
        Commands::Forecast {
            user,
            months,
            format,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = commands::load_config(cli.config.as_deref())?;
            let mut out = std::io::stdout().lock();
            commands::cmd_forecast(&db, config, user, months, format, &mut out)
        }
        Commands::Summary { user, months } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = commands::load_config(cli.config.as_deref())?;
            let mut out = std::io::stdout().lock();
            commands::cmd_summary(&db, config, user, months, &mut out)
        }
    }
}
