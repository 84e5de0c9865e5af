//! User command implementations

use anyhow::{Context, Result};
use spendcast_core::db::Database;

use super::truncate;

pub fn cmd_users_add(db: &Database, name: &str, income: f64) -> Result<i64> {
    let id = db
        .add_user(name, income)
        .with_context(|| format!("Failed to add user {}", name))?;
    println!(
        "✅ Added user {} (ID {}), monthly income ${:.2}",
        name, id, income
    );
    Ok(id)
}

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users. Add one with 'spendcast users add --name NAME --income N'.");
        return Ok(());
    }

    println!("{:>5}  {:24}  {:>12}", "ID", "Name", "Income");
    println!("{}", "─".repeat(45));
    for user in &users {
        println!(
            "{:>5}  {:24}  {:>12.2}",
            user.id,
            truncate(&user.name, 24),
            user.income
        );
    }

    Ok(())
}
