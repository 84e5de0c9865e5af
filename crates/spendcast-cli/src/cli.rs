//! CLI argument definitions using clap
//!
//! The command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Spendcast - Forecast spending by category
#[derive(Parser)]
#[command(name = "spendcast")]
#[command(about = "Monthly spending history and forecasts by category", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendcast.db", global = true)]
    pub db: PathBuf,

    /// Forecast configuration file (TOML)
    ///
    /// Defaults to the user data directory override if present, then the
    /// built-in configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set SPENDCAST_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// List spending categories
    Categories,

    /// Import a ledger CSV (date,category,amount) for a user
    Import {
        /// User ID
        #[arg(short, long)]
        user: i64,

        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show monthly spending by category
    History {
        /// User ID
        #[arg(short, long)]
        user: i64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Forecast spending by category
    Forecast {
        /// User ID
        #[arg(short, long)]
        user: i64,

        /// Number of months to forecast
        #[arg(short, long, default_value = "3")]
        months: u32,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print a JSON spending summary
    Summary {
        /// User ID
        #[arg(short, long)]
        user: i64,

        /// Number of months to forecast
        #[arg(short, long, default_value = "3")]
        months: u32,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// Add a user
    Add {
        #[arg(long)]
        name: String,

        /// Monthly income
        #[arg(long)]
        income: f64,
    },

    /// List users
    List,
}

/// Output format for tabular reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}
