//! # Field Equality Filters
//!
//! A `FieldFilter` is a conjunction of `field == value` predicates over a
//! document's data map.
//!
//! - A dotted field (`address.city`) walks nested objects; an array met on
//!   the way is searched element by element
//! - A scalar or object predicate matches an array field that contains an
//!   equal element; an array predicate also matches the whole array
//! - A null predicate matches a null or unresolved field

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::DocumentData;

/// One equality predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPredicate {
    /// Field to compare
    pub field: String,

    /// Value the field must equal
    pub value: Value,
}

impl FieldPredicate {
    /// Check a document's data against this predicate.
    pub fn matches(&self, data: &DocumentData) -> bool {
        let path: Vec<&str> = self.field.split('.').collect();
        let mut resolved = Vec::new();
        if let Some((head, rest)) = path.split_first() {
            if let Some(value) = data.get(*head) {
                collect_path(value, rest, &mut resolved);
            }
        }

        if resolved.is_empty() {
            return self.value.is_null();
        }
        resolved.into_iter().any(|candidate| self.matches_value(candidate))
    }

    fn matches_value(&self, candidate: &Value) -> bool {
        if values_equal(candidate, &self.value) {
            return true;
        }
        match candidate {
            Value::Array(items) => items.iter().any(|item| values_equal(item, &self.value)),
            _ => false,
        }
    }
}

/// Pushes every value reachable from `value` along `path`.
fn collect_path<'a>(value: &'a Value, path: &[&str], out: &mut Vec<&'a Value>) {
    let Some((segment, rest)) = path.split_first() else {
        out.push(value);
        return;
    };
    match value {
        Value::Object(map) => {
            if let Some(next) = map.get(*segment) {
                collect_path(next, rest, out);
            }
        }
        Value::Array(items) => {
            for item in items.iter().filter(|item| item.is_object()) {
                collect_path(item, path, out);
            }
        }
        _ => {}
    }
}

/// Conjunction of equality predicates. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    predicates: Vec<FieldPredicate>,
}

impl FieldFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality predicate
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(FieldPredicate {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Build a filter from `key=value` arguments.
    ///
    /// The value is read as JSON when it parses (`price=5`, `active=true`,
    /// `name="Laptop"`), and as a plain string otherwise (`name=Laptop`).
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (field, raw) = pair
                .split_once('=')
                .ok_or_else(|| format!("Invalid filter '{}': expected key=value", pair))?;
            if field.is_empty() {
                return Err(format!("Invalid filter '{}': empty field name", pair));
            }
            filter = filter.eq(field, parse_filter_value(raw));
        }
        Ok(filter)
    }

    /// The predicates, in insertion order
    pub fn predicates(&self) -> &[FieldPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check whether every predicate holds for the data
    pub fn matches(&self, data: &DocumentData) -> bool {
        self.predicates.iter().all(|p| p.matches(data))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FieldFilter {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |filter, (field, value)| filter.eq(field, value))
    }
}

/// Numbers compare numerically, so `5` equals `5.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

fn parse_filter_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
