//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init, categories, and shared utilities (open_db, load_config)
//! - `import` - Ledger CSV import
//! - `reports` - History, forecast, and summary output
//! - `users` - User management

pub mod core;
pub mod import;
pub mod reports;
pub mod users;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use reports::*;
pub use users::*;

/// Truncate a string to max length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
