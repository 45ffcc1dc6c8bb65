//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid preferences file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("Unsupported preferences version: {0}")]
    UnsupportedVersion(u32),
}
