// ABOUTME: Recursive structural validator reporting every defect in a single pass
// ABOUTME: Produces path-qualified errors without mutating or short-circuiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Schema Validator
//!
//! Checks an arbitrary JSON document against a [`DocumentSchema`] and
//! accumulates every violation so one pass communicates the complete defect
//! list. Paths qualify nested errors: `action_items[2].priority`,
//! `next_meeting.date`. Fields the schema does not declare are ignored.
//!
//! The validator only reports structural errors. Advisory warnings come from
//! domain layers (see [`crate::analysis::meeting`]) and never affect
//! validity.

use super::schema::{DocumentSchema, FieldSchema, FieldType, ValidationResult};
use serde_json::Value;

/// Validate `document` against `schema`, accumulating all violations.
#[must_use]
pub fn validate(document: &Value, schema: &DocumentSchema) -> ValidationResult {
    let mut errors = Vec::new();

    match document.as_object() {
        Some(object) => {
            for (name, field) in schema {
                match object.get(name) {
                    Some(value) => validate_field(name, value, field, &mut errors),
                    None => {
                        if field.required {
                            errors.push(format!("Missing required field: {name}"));
                        }
                    }
                }
            }
        }
        None => {
            // A non-object document is missing every required field
            for (name, field) in schema {
                if field.required {
                    errors.push(format!("Missing required field: {name}"));
                }
            }
        }
    }

    ValidationResult::from_errors(errors)
}

fn validate_field(path: &str, value: &Value, field: &FieldSchema, errors: &mut Vec<String>) {
    match field.field_type {
        FieldType::Array => {
            let Some(items) = value.as_array() else {
                errors.push(format!("{path} must be an array"));
                return;
            };
            if let Some(item_schema) = &field.item_schema {
                for (index, item) in items.iter().enumerate() {
                    validate_object_members(&format!("{path}[{index}]"), item, item_schema, errors);
                }
            }
        }
        FieldType::Object => {
            if !value.is_object() {
                errors.push(format!("{path} must be an object"));
                return;
            }
            if let Some(schema) = &field.schema {
                validate_object_members(path, value, schema, errors);
            }
        }
        FieldType::String | FieldType::Number | FieldType::Boolean => {
            validate_leaf(path, value, field, errors);
        }
    }
}

fn validate_object_members(
    path: &str,
    value: &Value,
    schema: &DocumentSchema,
    errors: &mut Vec<String>,
) {
    let Some(object) = value.as_object() else {
        errors.push(format!("{path} must be an object"));
        return;
    };

    for (name, field) in schema {
        let child_path = format!("{path}.{name}");
        match object.get(name) {
            Some(child) => validate_field(&child_path, child, field, errors),
            None => {
                if field.required {
                    errors.push(format!("{child_path} is required but missing"));
                }
            }
        }
    }
}

fn validate_leaf(path: &str, value: &Value, field: &FieldSchema, errors: &mut Vec<String>) {
    if !field.field_type.matches(value) {
        errors.push(format!("{path} must be a {}", field.field_type.as_str()));
        return;
    }

    if let Some(allowed) = &field.enum_values {
        let is_member = value
            .as_str()
            .is_some_and(|s| allowed.iter().any(|a| a == s));
        if !is_member {
            errors.push(format!("{path} must be one of: {}", allowed.join(", ")));
        }
    }

    if field.field_type == FieldType::Number {
        if let Some(number) = value.as_f64() {
            if let Some(min) = field.min {
                if number < min {
                    errors.push(format!("{path} must be >= {min}"));
                }
            }
            if let Some(max) = field.max {
                if number > max {
                    errors.push(format!("{path} must be <= {max}"));
                }
            }
        }
    }
}
