use thiserror::Error;

use crate::host::StoreError;
use crate::schema::{MigrationError, ParseError};

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Config parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ZoneError>;
