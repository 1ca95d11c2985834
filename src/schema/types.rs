//! Schema type definitions
//!
//! Supported field types:
//! - STRING, INTEGER, DOUBLE, BOOLEAN: type-checked on every write
//! - DATE, OBJECT, ARRAY: declarable, accepted without a type check
//!
//! The JSON shape uses camelCase keys (`collectionName`, `defaultValue`,
//! `nestedFields`, ...); constraints travel as a `validation` map.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::constraint::{self, Constraint};

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Integer, or a string that parses as one
    Integer,
    /// Floating point number, or a string that parses as one
    Double,
    /// Boolean, or the strings "true"/"false" in any case
    Boolean,
    /// Date (not type-checked)
    Date,
    /// Nested object (not type-checked)
    Object,
    /// List (not type-checked)
    Array,
}

impl FieldType {
    /// Returns the canonical upper-case type name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Integer => "INTEGER",
            FieldType::Double => "DOUBLE",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
            FieldType::Object => "OBJECT",
            FieldType::Array => "ARRAY",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STRING" => Ok(FieldType::String),
            "INTEGER" => Ok(FieldType::Integer),
            "DOUBLE" => Ok(FieldType::Double),
            "BOOLEAN" => Ok(FieldType::Boolean),
            "DATE" => Ok(FieldType::Date),
            "OBJECT" => Ok(FieldType::Object),
            "ARRAY" => Ok(FieldType::Array),
            other => Err(format!("unknown field type '{}'", other)),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Definition of one declared field of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name, unique within its parent field list
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Missing or blank values are violations when set
    #[serde(default)]
    pub required: bool,
    /// Injected on create when the key is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Value constraints, checked only against values of the matching kind
    #[serde(
        default,
        rename = "validation",
        with = "constraint::map_form",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub constraints: Vec<Constraint>,
    /// Child fields of an OBJECT field. Declared only; not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_fields: Option<Vec<FieldDefinition>>,
}

impl FieldDefinition {
    /// Create an optional field with no default and no constraints
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default_value: None,
            constraints: Vec::new(),
            nested_fields: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Append a constraint
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Set nested field definitions
    pub fn with_nested(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.nested_fields = Some(fields);
        self
    }

    /// Default value, ignoring an explicit JSON null
    pub fn effective_default(&self) -> Option<&Value> {
        self.default_value.as_ref().filter(|v| !v.is_null())
    }
}

/// Schema of one named collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    /// Identity assigned by the registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unique collection name
    pub collection_name: String,
    /// Ordered field definitions
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl CollectionSchema {
    /// Create an unregistered schema
    pub fn new(collection_name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            id: None,
            collection_name: collection_name.into(),
            fields,
            created_at: None,
            updated_at: None,
            created_by: None,
        }
    }

    /// Record the creator identity
    pub fn created_by(mut self, creator: impl Into<String>) -> Self {
        self.created_by = Some(creator.into());
        self
    }

    /// Looks up a top-level field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}
