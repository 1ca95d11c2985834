//! Default injection and partial-update merging
//!
//! Both operations are pure map manipulation; neither validates.

use super::document::DocumentData;
use crate::schema::FieldDefinition;

/// Injects schema defaults for keys absent from `data`.
///
/// A key that is present is never overwritten, even when its value is null.
/// Fields whose default is missing or null inject nothing.
pub fn apply_defaults(data: &mut DocumentData, fields: &[FieldDefinition]) {
    for field in fields {
        if data.contains_key(&field.name) {
            continue;
        }
        if let Some(default) = field.effective_default() {
            data.insert(field.name.clone(), default.clone());
        }
    }
}

/// Returns `existing` with every key of `updates` applied on top.
///
/// Keys only in `existing` are kept unchanged; the result holds exactly the
/// union of both key sets.
pub fn merge_for_update(existing: &DocumentData, updates: &DocumentData) -> DocumentData {
    let mut merged = existing.clone();
    for (key, value) in updates {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
