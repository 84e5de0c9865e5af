//! Transaction operations and the `TransactionStore` implementation

use chrono::NaiveDate;
use rusqlite::params;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionRecord, UserProfile};
use crate::store::TransactionStore;

/// Parse a stored date, accepting a trailing time component
fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| Error::CorruptRecord(format!("Unparseable transaction date: {}", s)))
}

impl Database {
    /// Record a transaction for a user, creating its category if needed
    pub fn insert_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<i64> {
        let category_id = self.upsert_category(&tx.category)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO transactions (user_id, category_id, amount, date) VALUES (?, ?, ?, ?)",
            params![
                user_id,
                category_id,
                tx.amount,
                tx.date.format("%Y-%m-%d").to_string()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Number of transactions stored for a user
    pub fn count_transactions(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl TransactionStore for Database {
    fn list_user_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT t.user_id, c.name, t.amount, t.date
            FROM transactions t
            JOIN categories c ON t.category_id = c.id
            WHERE t.user_id = ?
            ORDER BY t.date, t.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(user_id, category, amount, date)| {
                Ok(TransactionRecord {
                    user_id,
                    category,
                    amount,
                    date: parse_stored_date(&date)?,
                })
            })
            .collect()
    }

    fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>> {
        self.get_user_profile(user_id)
    }

    fn list_category_names(&self) -> Result<Vec<String>> {
        self.list_categories()
    }
}
