//! Field value constraints
//!
//! Each constraint targets one kind of value. A constraint whose target kind
//! does not match the runtime value is skipped, not reported.

use serde_json::Value;

/// A single value constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Minimum string length, inclusive
    MinLength(u64),
    /// Maximum string length, inclusive
    MaxLength(u64),
    /// Minimum numeric value, inclusive
    Min(f64),
    /// Maximum numeric value, inclusive
    Max(f64),
}

/// Outcome of checking one constraint against one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintCheck {
    Satisfied,
    Violated,
    /// Value kind does not match the constraint's target
    NotApplicable,
}

impl Constraint {
    /// Checks a present, non-null value.
    pub fn check(&self, value: &Value) -> ConstraintCheck {
        match (self, value) {
            (Constraint::MinLength(n), Value::String(s)) => {
                verdict(char_len(s) >= *n)
            }
            (Constraint::MaxLength(n), Value::String(s)) => {
                verdict(char_len(s) <= *n)
            }
            (Constraint::Min(bound), Value::Number(num)) => match num.as_f64() {
                Some(x) => verdict(x >= *bound),
                None => ConstraintCheck::NotApplicable,
            },
            (Constraint::Max(bound), Value::Number(num)) => match num.as_f64() {
                Some(x) => verdict(x <= *bound),
                None => ConstraintCheck::NotApplicable,
            },
            (Constraint::MinLength(_) | Constraint::MaxLength(_), _)
            | (Constraint::Min(_) | Constraint::Max(_), _) => ConstraintCheck::NotApplicable,
        }
    }
}

fn verdict(ok: bool) -> ConstraintCheck {
    if ok {
        ConstraintCheck::Satisfied
    } else {
        ConstraintCheck::Violated
    }
}

fn char_len(s: &str) -> u64 {
    s.chars().count() as u64
}

/// Serde adapter between `Vec<Constraint>` and the constraint map
/// (`{"minLength": 2, "max": 10}`).
pub(crate) mod map_form {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Constraint;

    #[derive(Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ConstraintMap {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    }

    pub fn serialize<S: Serializer>(
        constraints: &[Constraint],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = ConstraintMap::default();
        for c in constraints {
            match *c {
                Constraint::MinLength(n) => map.min_length = Some(n),
                Constraint::MaxLength(n) => map.max_length = Some(n),
                Constraint::Min(x) => map.min = Some(x),
                Constraint::Max(x) => map.max = Some(x),
            }
        }
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Constraint>, D::Error> {
        let map = Option::<ConstraintMap>::deserialize(deserializer)?.unwrap_or_default();
        let constraints = [
            map.min_length.map(Constraint::MinLength),
            map.max_length.map(Constraint::MaxLength),
            map.min.map(Constraint::Min),
            map.max.map(Constraint::Max),
        ];
        Ok(constraints.into_iter().flatten().collect())
    }
}
