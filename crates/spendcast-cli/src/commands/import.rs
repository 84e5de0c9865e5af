//! Ledger import command

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use spendcast_core::{db::Database, import::parse_ledger_csv};
use tracing::info;

/// Import a ledger CSV for a user, returning the number of transactions added
pub fn cmd_import(db: &Database, user_id: i64, file: &Path) -> Result<usize> {
    let user = db
        .get_user_profile(user_id)?
        .with_context(|| format!("No user with ID {}", user_id))?;

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    println!("📥 Importing {} for {}...", file.display(), user.name);

    let transactions = parse_ledger_csv(BufReader::new(csv_file))
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    for tx in &transactions {
        db.insert_transaction(user_id, tx)?;
    }

    info!(user_id, count = transactions.len(), "Imported ledger");
    println!("✅ Imported {} transactions", transactions.len());

    Ok(transactions.len())
}
