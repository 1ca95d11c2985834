//! Payload validation against a collection schema
//!
//! Validation semantics:
//! - Declared fields are checked in schema order
//! - A required field that is missing, null or blank yields one violation
//!   and no further checks for that field
//! - STRING, INTEGER, DOUBLE and BOOLEAN are type-checked (with string
//!   leniency for the last three); DATE, OBJECT and ARRAY pass through
//! - Constraints run after the type check, each only against values of
//!   its own kind
//! - Undeclared payload keys are ignored
//! - Violations accumulate across fields
//!
//! `nested_fields` of OBJECT fields are not descended into.

use serde_json::{Map, Value};

use super::coerce;
use super::constraint::{Constraint, ConstraintCheck};
use super::errors::{Violation, ViolationKind};
use super::types::{CollectionSchema, FieldDefinition, FieldType};

/// Validates a payload against a schema. An empty result means valid.
pub fn validate(payload: &Map<String, Value>, schema: &CollectionSchema) -> Vec<Violation> {
    validate_fields(payload, &schema.fields)
}

/// Validates a payload against a list of field definitions.
pub fn validate_fields(payload: &Map<String, Value>, fields: &[FieldDefinition]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for field in fields {
        validate_field(payload, field, "", &mut violations);
    }
    violations
}

fn validate_field(
    payload: &Map<String, Value>,
    field: &FieldDefinition,
    path_prefix: &str,
    violations: &mut Vec<Violation>,
) {
    let field_path = make_path(path_prefix, &field.name);
    let value = payload.get(&field.name).filter(|v| !v.is_null());

    if field.required && value.map_or(true, coerce::is_blank) {
        violations.push(Violation::required(field_path));
        return;
    }

    let Some(value) = value else {
        return;
    };

    if let Some(kind) = type_violation(field.field_type, value) {
        violations.push(Violation::new(field_path.clone(), kind));
    }

    for constraint in &field.constraints {
        if constraint.check(value) == ConstraintCheck::Violated {
            violations.push(Violation::new(field_path.clone(), constraint_violation(constraint)));
        }
    }
}

/// Returns the violation for a value that does not fit its declared type.
fn type_violation(field_type: FieldType, value: &Value) -> Option<ViolationKind> {
    match field_type {
        FieldType::String if !value.is_string() => Some(ViolationKind::NotString),
        FieldType::Integer if coerce::as_integer(value).is_none() => Some(ViolationKind::NotInteger),
        FieldType::Double if coerce::as_number(value).is_none() => Some(ViolationKind::NotNumber),
        FieldType::Boolean if coerce::as_boolean(value).is_none() => Some(ViolationKind::NotBoolean),
        FieldType::String
        | FieldType::Integer
        | FieldType::Double
        | FieldType::Boolean
        | FieldType::Date
        | FieldType::Object
        | FieldType::Array => None,
    }
}

fn constraint_violation(constraint: &Constraint) -> ViolationKind {
    match *constraint {
        Constraint::MinLength(n) => ViolationKind::TooShort(n),
        Constraint::MaxLength(n) => ViolationKind::TooLong(n),
        Constraint::Min(x) => ViolationKind::BelowMin(x),
        Constraint::Max(x) => ViolationKind::AboveMax(x),
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn messages(violations: &[Violation]) -> Vec<String> {
        violations.iter().map(ToString::to_string).collect()
    }

    fn products() -> CollectionSchema {
        CollectionSchema::new(
            "products",
            vec![
                FieldDefinition::new("name", FieldType::String)
                    .required()
                    .with_constraint(Constraint::MinLength(2))
                    .with_constraint(Constraint::MaxLength(100)),
                FieldDefinition::new("price", FieldType::Double)
                    .required()
                    .with_constraint(Constraint::Min(0.0)),
                FieldDefinition::new("category", FieldType::String).with_default("general"),
            ],
        )
    }

    #[test]
    fn test_valid_payload_passes() {
        let v = validate(&payload(json!({"name": "Laptop", "price": 999.99})), &products());
        assert!(v.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let v = validate(&payload(json!({"price": 1.0})), &products());
        assert_eq!(messages(&v), vec!["Field 'name' is required"]);
    }

    #[test]
    fn test_blank_and_null_count_as_missing() {
        let v = validate(&payload(json!({"name": "   ", "price": null})), &products());
        assert_eq!(
            messages(&v),
            vec!["Field 'name' is required", "Field 'price' is required"]
        );
    }

    #[test]
    fn test_required_failure_stops_checks_for_that_field() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("code", FieldType::String)
                .required()
                .with_constraint(Constraint::MinLength(3))],
        );
        let v = validate(&payload(json!({"code": ""})), &schema);
        assert_eq!(messages(&v), vec!["Field 'code' is required"]);
    }

    #[test]
    fn test_below_min() {
        let v = validate(&payload(json!({"name": "Laptop", "price": -5})), &products());
        assert_eq!(messages(&v), vec!["Field 'price' must be at least 0.0"]);
    }

    #[test]
    fn test_large_bound_in_exponent_form() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("big", FieldType::Double).with_constraint(Constraint::Max(1e7))],
        );
        let v = validate(&payload(json!({"big": 2e7})), &schema);
        assert_eq!(messages(&v), vec!["Field 'big' must be at most 1.0E7"]);
    }

    #[test]
    fn test_non_numeric_string_for_double() {
        let v = validate(
            &payload(json!({"name": "Laptop", "price": "not-a-number"})),
            &products(),
        );
        assert_eq!(messages(&v), vec!["Field 'price' must be a number"]);
    }

    #[test]
    fn test_numeric_string_accepted_but_unconstrained() {
        // "-5" parses as a number, and min only applies to native numbers
        let v = validate(&payload(json!({"name": "Laptop", "price": "-5"})), &products());
        assert!(v.is_empty());
    }

    #[test]
    fn test_integer_leniency() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("qty", FieldType::Integer)],
        );
        assert!(validate(&payload(json!({"qty": 3})), &schema).is_empty());
        assert!(validate(&payload(json!({"qty": "42"})), &schema).is_empty());
        assert_eq!(
            messages(&validate(&payload(json!({"qty": 2.5})), &schema)),
            vec!["Field 'qty' must be an integer"]
        );
        assert_eq!(
            messages(&validate(&payload(json!({"qty": "abc"})), &schema)),
            vec!["Field 'qty' must be an integer"]
        );
    }

    #[test]
    fn test_integer_string_beyond_32_bits() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("qty", FieldType::Integer)],
        );
        assert_eq!(
            messages(&validate(&payload(json!({"qty": "3000000000"})), &schema)),
            vec!["Field 'qty' must be an integer"]
        );
        assert!(validate(&payload(json!({"qty": 3_000_000_000_i64})), &schema).is_empty());
    }

    #[test]
    fn test_lowercase_float_spellings_rejected() {
        for price in ["inf", "nan", "infinity"] {
            let v = validate(&payload(json!({"name": "Laptop", "price": price})), &products());
            assert_eq!(messages(&v), vec!["Field 'price' must be a number"]);
        }
    }

    #[test]
    fn test_boolean_leniency() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("active", FieldType::Boolean)],
        );
        assert!(validate(&payload(json!({"active": true})), &schema).is_empty());
        assert!(validate(&payload(json!({"active": "False"})), &schema).is_empty());
        assert_eq!(
            messages(&validate(&payload(json!({"active": "yes"})), &schema)),
            vec!["Field 'active' must be a boolean"]
        );
    }

    #[test]
    fn test_type_and_constraint_violations_both_reported() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("label", FieldType::String)
                .with_constraint(Constraint::Max(10.0))],
        );
        let v = validate(&payload(json!({"label": 50})), &schema);
        assert_eq!(
            messages(&v),
            vec!["Field 'label' must be a string", "Field 'label' must be at most 10.0"]
        );
    }

    #[test]
    fn test_mismatched_constraint_kind_skipped() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("n", FieldType::Integer)
                .with_constraint(Constraint::MinLength(5))],
        );
        assert!(validate(&payload(json!({"n": 1})), &schema).is_empty());
    }

    #[test]
    fn test_unchecked_types_pass_through() {
        let schema = CollectionSchema::new(
            "t",
            vec![
                FieldDefinition::new("when", FieldType::Date),
                FieldDefinition::new("meta", FieldType::Object),
                FieldDefinition::new("tags", FieldType::Array),
            ],
        );
        let v = validate(&payload(json!({"when": 12, "meta": "x", "tags": false})), &schema);
        assert!(v.is_empty());
    }

    #[test]
    fn test_nested_fields_not_traversed() {
        let schema = CollectionSchema::new(
            "t",
            vec![FieldDefinition::new("address", FieldType::Object).with_nested(vec![
                FieldDefinition::new("city", FieldType::String).required(),
            ])],
        );
        let v = validate(&payload(json!({"address": {}})), &schema);
        assert!(v.is_empty());
    }

    #[test]
    fn test_undeclared_fields_ignored() {
        let v = validate(
            &payload(json!({"name": "Laptop", "price": 1, "color": 42})),
            &products(),
        );
        assert!(v.is_empty());
    }

    #[test]
    fn test_violations_accumulate_in_schema_order() {
        let v = validate(&payload(json!({"name": "L", "category": 7})), &products());
        assert_eq!(
            messages(&v),
            vec![
                "Field 'name' must be at least 2 characters",
                "Field 'price' is required",
                "Field 'category' must be a string",
            ]
        );
    }

    #[test]
    fn test_make_path() {
        assert_eq!(make_path("", "city"), "city");
        assert_eq!(make_path("address", "city"), "address.city");
    }
}
