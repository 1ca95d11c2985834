//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by schema and document stores
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Unique key already taken
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Backing storage could not be read or written
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
