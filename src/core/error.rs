use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetOsError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to initialize database: {0}")]
    DatabaseInitializationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("User {id} is recorded as last updater of {assets} asset(s) and cannot be deleted")]
    UserInUse { id: i64, assets: i64 },
}
