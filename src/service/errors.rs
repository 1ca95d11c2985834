//! # Service Errors
//!
//! The failure kinds a caller of `CollectionService` can observe. Each kind
//! has a stable string code for machine consumers.

use thiserror::Error;

use crate::schema::{join_violations, SchemaError, Violation};
use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service errors
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Collection schema already exists: {0}")]
    DuplicateSchema(String),

    #[error("Collection schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The payload broke one or more schema rules; never empty
    #[error("Validation errors: {}", join_violations(.0))]
    ValidationFailed(Vec<Violation>),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ServiceError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::DuplicateSchema(_) => "FLEX_DUPLICATE_SCHEMA",
            ServiceError::SchemaNotFound(_) => "FLEX_SCHEMA_NOT_FOUND",
            ServiceError::DocumentNotFound(_) => "FLEX_DOCUMENT_NOT_FOUND",
            ServiceError::ValidationFailed(_) => "FLEX_VALIDATION_FAILED",
            ServiceError::StoreUnavailable(_) => "FLEX_STORE_UNAVAILABLE",
        }
    }

    /// Only store failures are worth retrying unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::StoreUnavailable(_))
    }

    /// The individual violations of a validation failure
    pub fn violations(&self) -> &[Violation] {
        match self {
            ServiceError::ValidationFailed(violations) => violations,
            _ => &[],
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(name) => ServiceError::DuplicateSchema(name),
            StoreError::Unavailable(msg) => ServiceError::StoreUnavailable(msg),
        }
    }
}

impl From<SchemaError> for ServiceError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Duplicate(name) => ServiceError::DuplicateSchema(name),
            SchemaError::NotFound(name) => ServiceError::SchemaNotFound(name),
            SchemaError::Store(store) => store.into(),
        }
    }
}
