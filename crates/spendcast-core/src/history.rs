//! Monthly spending history aggregation
//!
//! Groups a user's transactions by (calendar month, category), sums each
//! group, and pivots the sums into a month × category table. Only months with
//! at least one transaction become rows; a category with no spending in an
//! observed month gets a zero cell.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{TransactionRecord, YearMonth};
use crate::store::TransactionStore;
use crate::table::MonthlyTable;

/// Monthly spending by category, months ascending, categories sorted by name
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SpendingHistory {
    table: MonthlyTable,
}

impl SpendingHistory {
    /// History for a user with no transactions: no rows, no columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Aggregate raw transactions into the month × category table
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        if records.is_empty() {
            return Self::empty();
        }

        let mut sums: BTreeMap<(YearMonth, &str), f64> = BTreeMap::new();
        let mut months = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for record in records {
            let month = YearMonth::from_date(record.date);
            months.insert(month);
            categories.insert(record.category.as_str());
            *sums.entry((month, record.category.as_str())).or_insert(0.0) += record.amount;
        }

        let months: Vec<YearMonth> = months.into_iter().collect();
        let columns = categories
            .into_iter()
            .map(|category| {
                let values = months
                    .iter()
                    .map(|month| sums.get(&(*month, category)).copied().unwrap_or(0.0))
                    .collect();
                (category.to_string(), values)
            })
            .collect();

        // Every column is built from `months`, so lengths always agree
        let table = MonthlyTable::from_columns(months, columns).unwrap_or_default();
        Self { table }
    }

    /// True for a user with no transactions
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of observed months
    pub fn month_count(&self) -> usize {
        self.table.row_count()
    }

    /// Most recent observed month
    pub fn last_month(&self) -> Option<YearMonth> {
        self.table.months().last().copied()
    }

    pub fn months(&self) -> &[YearMonth] {
        self.table.months()
    }

    pub fn categories(&self) -> &[String] {
        self.table.categories()
    }

    pub fn table(&self) -> &MonthlyTable {
        &self.table
    }
}

/// Load and aggregate a user's spending history from the store
pub fn get_spending_history<S: TransactionStore + ?Sized>(
    store: &S,
    user_id: i64,
) -> Result<SpendingHistory> {
    let records = store.list_user_transactions(user_id)?;
    let history = SpendingHistory::from_records(&records);

    debug!(
        user_id,
        transactions = records.len(),
        months = history.month_count(),
        categories = history.categories().len(),
        "Aggregated spending history"
    );

    Ok(history)
}
