//! Document subsystem for flexdb
//!
//! - [`DynamicDocument`]: one stored record (id, data map, collection, timestamps)
//! - [`apply_defaults`] / [`merge_for_update`]: shape payloads before validation
//! - [`FieldFilter`]: field-equality predicates for filtered reads

mod document;
mod filter;
mod merge;

pub use document::{DocumentData, DocumentUpdate, DynamicDocument};
pub use filter::{FieldFilter, FieldPredicate};
pub use merge::{apply_defaults, merge_for_update};
