//! Spendcast Core Library
//!
//! Spending forecasting for the Spendcast personal finance tool:
//! - Transaction store access (SQLite with optional SQLCipher encryption)
//! - Monthly spending history by category
//! - Per-category AR(1) forecasts with a historical-mean fallback
//! - Income-weighted forecasts for users with little history
//! - Ledger CSV import and spending summaries

pub mod autoregressive;
pub mod config;
pub mod db;
pub mod error;
pub mod forecast;
pub mod history;
pub mod import;
pub mod models;
pub mod store;
pub mod summary;
pub mod table;

pub use autoregressive::{Ar1Model, ModelError};
pub use config::{FallbackLabels, ForecastConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use forecast::{
    forecast_from_history, project_category, CategoryProjection, ForecastBasis, ForecastTable,
    ProjectionMethod, SpendingForecaster,
};
pub use history::{get_spending_history, SpendingHistory};
pub use import::parse_ledger_csv;
pub use models::{NewTransaction, TransactionRecord, UserProfile, YearMonth};
pub use store::{MemoryStore, TransactionStore};
pub use summary::SpendingSummary;
pub use table::MonthlyTable;
