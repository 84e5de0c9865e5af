//! Category operations

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Database;
use crate::error::{Error, Result};

/// Categories seeded by `spendcast init`
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Housing",
    "Food",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Miscellaneous",
];

impl Database {
    /// Create a category or return the existing one's ID
    pub fn upsert_category(&self, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Import("Category name cannot be empty".to_string()));
        }

        let conn = self.conn()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute("INSERT INTO categories (name) VALUES (?)", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert the default categories that are not present yet
    pub fn seed_default_categories(&self) -> Result<()> {
        for name in DEFAULT_CATEGORIES {
            self.upsert_category(name)?;
        }
        debug!(
            count = DEFAULT_CATEGORIES.len(),
            "Seeded default categories"
        );
        Ok(())
    }

    /// All category names in creation order
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY id")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }
}
