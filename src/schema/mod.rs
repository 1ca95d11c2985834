//! Schema subsystem for flexdb
//!
//! Schemas are declared per collection and enforced on every document write.
//!
//! # Design Principles
//!
//! - One schema per collection name
//! - Validation before persistence; a failing payload is never stored
//! - Only declared fields are checked; undeclared keys are allowed
//! - Validation is pure and deterministic

mod coerce;
mod constraint;
mod errors;
mod registry;
mod types;
mod validator;

pub use coerce::{as_boolean, as_integer, as_number, is_blank};
pub use constraint::{Constraint, ConstraintCheck};
pub use errors::{join_violations, SchemaError, SchemaResult, Violation, ViolationKind};
pub use registry::SchemaRegistry;
pub use types::{CollectionSchema, FieldDefinition, FieldType};
pub use validator::{validate, validate_fields};
