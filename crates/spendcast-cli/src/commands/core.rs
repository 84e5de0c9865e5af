//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Resolve the forecast configuration
//! - `cmd_init` - Initialize the database
//! - `cmd_categories` - List categories

use std::path::Path;

use anyhow::{Context, Result};
use spendcast_core::{db::Database, ForecastConfig};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the forecast configuration from `--config` or the default locations
pub fn load_config(path: Option<&Path>) -> Result<ForecastConfig> {
    ForecastConfig::load(path).context("Failed to load forecast configuration")
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    db.seed_default_categories()
        .context("Failed to seed default categories")?;
    println!("   Seeded default categories");

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a user: spendcast users add --name Alice --income 5000");
    println!("  2. Import a ledger: spendcast import --user 1 --file ledger.csv");
    println!("  3. Forecast: spendcast forecast --user 1 --months 3");

    Ok(())
}

pub fn cmd_categories(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    if categories.is_empty() {
        println!("No categories. Run 'spendcast init' to seed the defaults.");
        return Ok(());
    }

    println!("🏷️  Categories");
    for name in &categories {
        println!("   {}", name);
    }

    Ok(())
}
