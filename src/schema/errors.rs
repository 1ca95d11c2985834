//! Schema error and violation types
//!
//! `Violation` is one human-readable reason a payload fails validation.
//! `SchemaError` covers registry failures.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// What went wrong with one field.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Missing, null, or blank while required
    Required,
    NotString,
    NotInteger,
    NotNumber,
    NotBoolean,
    /// Shorter than `minLength`
    TooShort(u64),
    /// Longer than `maxLength`
    TooLong(u64),
    /// Below `min`
    BelowMin(f64),
    /// Above `max`
    AboveMax(f64),
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Field path (e.g. "price", or "address.city" for a nested field)
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::Required)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = &self.field;
        match &self.kind {
            ViolationKind::Required => write!(f, "Field '{}' is required", field),
            ViolationKind::NotString => write!(f, "Field '{}' must be a string", field),
            ViolationKind::NotInteger => write!(f, "Field '{}' must be an integer", field),
            ViolationKind::NotNumber => write!(f, "Field '{}' must be a number", field),
            ViolationKind::NotBoolean => write!(f, "Field '{}' must be a boolean", field),
            ViolationKind::TooShort(n) => {
                write!(f, "Field '{}' must be at least {} characters", field, n)
            }
            ViolationKind::TooLong(n) => {
                write!(f, "Field '{}' must be at most {} characters", field, n)
            }
            ViolationKind::BelowMin(x) => {
                write!(f, "Field '{}' must be at least {}", field, format_bound(*x))
            }
            ViolationKind::AboveMax(x) => {
                write!(f, "Field '{}' must be at most {}", field, format_bound(*x))
            }
        }
    }
}

/// Renders a numeric bound the way bound messages have always read:
/// plain decimal with a fractional part inside `[1e-3, 1e7)`, otherwise
/// `<mantissa>E<exponent>` (`0.0`, `999.99`, `1.0E7`, `1.5E-4`).
fn format_bound(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", x);
    }

    let scientific = format!("{:e}", x);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

/// Joins violation messages for display, in order.
pub fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Registry errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Collection schema already exists: {0}")]
    Duplicate(String),

    #[error("Collection schema not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for SchemaError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(name) => SchemaError::Duplicate(name),
            other => SchemaError::Store(other),
        }
    }
}

/// Result type for registry operations
pub type SchemaResult<T> = Result<T, SchemaError>;
