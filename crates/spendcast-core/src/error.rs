//! Error types for spendcast

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corrupt record in store: {0}")]
    CorruptRecord(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid forecast horizon: {0} (must be at least one month)")]
    InvalidHorizon(u32),
}

impl Error {
    /// Whether this error comes from the transaction store rather than the caller's input
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Pool(_)
                | Self::Encryption(_)
                | Self::Io(_)
                | Self::CorruptRecord(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
