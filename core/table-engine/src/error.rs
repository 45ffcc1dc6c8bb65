//! FILENAME: core/table-engine/src/error.rs

use thiserror::Error;

use crate::definition::SortDirection;

/// Configuration errors. These are caller bugs: the table refuses to
/// build rather than render something misleading.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    #[error("Super-column colspans sum to {actual}, expected {expected}")]
    ColspanMismatch { expected: usize, actual: usize },

    #[error("Super-column \"{0}\" spans no columns")]
    EmptySuperColumn(String),

    #[error("Column index {column} out of range ({column_count} columns)")]
    ColumnOutOfRange { column: usize, column_count: usize },

    #[error("Default sort direction {direction:?} is not in the sort sequence of column {column}")]
    DefaultSortDirection {
        column: usize,
        direction: SortDirection,
    },

    #[error("Invalid column catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),
}

pub type TableResult<T> = Result<T, TableError>;
