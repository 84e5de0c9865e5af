//! User operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::UserProfile;

impl Database {
    /// Create a user with a monthly income
    pub fn add_user(&self, name: &str, income: f64) -> Result<i64> {
        if !income.is_finite() || income < 0.0 {
            let message = format!("Invalid income for {}: {}", name, income);
            return Err(Error::Import(message));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (name, income) VALUES (?, ?)",
            params![name, income],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a user by ID
    pub fn get_user_profile(&self, id: i64) -> Result<Option<UserProfile>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, name, income FROM users WHERE id = ?",
                params![id],
                |row| {
                    Ok(UserProfile {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        income: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<UserProfile>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name, income FROM users ORDER BY id")?;

        let users = stmt
            .query_map([], |row| {
                Ok(UserProfile {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    income: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }
}
