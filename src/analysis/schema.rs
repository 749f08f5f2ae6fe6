// ABOUTME: Recursive declarative field schema used by the validator and sanitizer
// ABOUTME: Describes type, requiredness, enums, numeric bounds, nested schemas, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Field Schema
//!
//! A document schema is a mapping from top-level field name to
//! [`FieldSchema`]. Schemas nest: an array of objects carries an
//! `item_schema` describing each element, an object field carries a `schema`
//! describing its members. The same schema family drives both validation and
//! sanitization, so a document repaired with a schema always validates
//! against it.
//!
//! `BTreeMap` keeps field iteration (and therefore error ordering)
//! deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Mapping from field name to its schema
pub type DocumentSchema = BTreeMap<String, FieldSchema>;

/// Value type a field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Any JSON number
    Number,
    /// Boolean flag
    Boolean,
    /// Sequence; elements are described by `item_schema` when present
    Array,
    /// Nested object described by `schema`
    Object,
}

impl FieldType {
    /// Human-readable type name used in validation messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether `value` holds this type
    #[must_use]
    pub const fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => matches!(value, Value::String(_)),
            Self::Number => matches!(value, Value::Number(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Array => matches!(value, Value::Array(_)),
            Self::Object => matches!(value, Value::Object(_)),
        }
    }
}

/// Schema for a single field, possibly nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Required value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
    /// Allowed values, for enumerated string fields
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Lower bound, numbers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound, numbers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Element schema, for arrays of objects
    #[serde(rename = "itemSchema", skip_serializing_if = "Option::is_none")]
    pub item_schema: Option<DocumentSchema>,
    /// Member schema, for object fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<DocumentSchema>,
    /// Designated fallback the sanitizer substitutes for a missing or
    /// invalid value; the type sentinel applies when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSchema {
    const fn new(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type,
            required,
            enum_values: None,
            min: None,
            max: None,
            item_schema: None,
            schema: None,
            default: None,
        }
    }

    /// String field
    #[must_use]
    pub const fn string(required: bool) -> Self {
        Self::new(FieldType::String, required)
    }

    /// Numeric field
    #[must_use]
    pub const fn number(required: bool) -> Self {
        Self::new(FieldType::Number, required)
    }

    /// Boolean field
    #[must_use]
    pub const fn boolean(required: bool) -> Self {
        Self::new(FieldType::Boolean, required)
    }

    /// Array field with unchecked elements
    #[must_use]
    pub const fn array(required: bool) -> Self {
        Self::new(FieldType::Array, required)
    }

    /// Array field whose object elements follow `item_schema`
    #[must_use]
    pub fn array_of(required: bool, item_schema: DocumentSchema) -> Self {
        let mut field = Self::new(FieldType::Array, required);
        field.item_schema = Some(item_schema);
        field
    }

    /// Object field whose members follow `schema`
    #[must_use]
    pub fn object(required: bool, schema: DocumentSchema) -> Self {
        let mut field = Self::new(FieldType::Object, required);
        field.schema = Some(schema);
        field
    }

    /// Restrict the field to an allowed value set
    #[must_use]
    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|v| (*v).to_owned()).collect());
        self
    }

    /// Restrict a numeric field to `[min, max]`
    #[must_use]
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Designate the sanitizer fallback for this field
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Outcome of validating a document against a schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub valid: bool,
    /// Path-qualified structural violations, in schema order
    pub errors: Vec<String>,
    /// Advisory quality observations; never affect `valid`
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result from accumulated errors
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Attach advisory warnings
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_matches() {
        assert!(FieldType::String.matches(&json!("x")));
        assert!(FieldType::Number.matches(&json!(1.5)));
        assert!(FieldType::Boolean.matches(&json!(false)));
        assert!(FieldType::Array.matches(&json!([])));
        assert!(FieldType::Object.matches(&json!({})));
        assert!(!FieldType::Object.matches(&json!([])));
        assert!(!FieldType::Number.matches(&json!("1.5")));
    }

    #[test]
    fn test_builder_chain() {
        let field = FieldSchema::string(true)
            .with_enum(&["high", "medium", "low"])
            .with_default(json!("medium"));

        assert_eq!(field.field_type, FieldType::String);
        assert!(field.required);
        assert_eq!(
            field.enum_values.as_deref(),
            Some(&["high".to_owned(), "medium".to_owned(), "low".to_owned()][..])
        );
        assert_eq!(field.default, Some(json!("medium")));
    }

    #[test]
    fn test_schema_serialization_uses_wire_names() {
        let field = FieldSchema::number(true).with_range(0.0, 1.0);
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "number");
        assert_eq!(json["min"], 0.0);
        assert_eq!(json["max"], 1.0);
        assert!(json.get("itemSchema").is_none());
    }
}
