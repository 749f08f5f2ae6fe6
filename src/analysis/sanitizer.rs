// ABOUTME: Total repair of possibly-invalid documents into schema-valid ones
// ABOUTME: Substitutes designated defaults or type sentinels, never raises an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Sanitizer
//!
//! Repairs any input, including `null` and wrong-typed documents, into one
//! the validator reports as valid. The output is rebuilt from the schema:
//! declared fields only, optional absent fields stay absent, and a present
//! value survives only if it is valid for its field (containers are repaired
//! recursively). Everything else is substituted, preferring the field's
//! designated default over the type sentinel.
//!
//! Sentinels: `""` for strings (first enum member for enumerated fields),
//! `0` clamped into declared bounds for numbers, `false` for booleans, `[]`
//! for arrays, the minimal valid instance for objects.
//!
//! `sanitize` is pure, total, and idempotent.

use super::schema::{DocumentSchema, FieldSchema, FieldType};
use serde_json::{Map, Value};

/// Repair `document` into a form guaranteed to validate against `schema`.
#[must_use]
pub fn sanitize(document: &Value, schema: &DocumentSchema) -> Value {
    build_object(document.as_object(), schema)
}

fn build_object(input: Option<&Map<String, Value>>, schema: &DocumentSchema) -> Value {
    let mut output = Map::new();
    for (name, field) in schema {
        let value = input.and_then(|object| object.get(name));
        if let Some(repaired) = repair_field(value, field) {
            output.insert(name.clone(), repaired);
        }
    }
    Value::Object(output)
}

/// Repair one field. `None` means an optional field stays absent.
fn repair_field(value: Option<&Value>, field: &FieldSchema) -> Option<Value> {
    match field.field_type {
        FieldType::Array => match value {
            Some(Value::Array(items)) => Some(Value::Array(repair_items(items, field))),
            _ if field.required => Some(fallback(field)),
            _ => None,
        },
        FieldType::Object => match value {
            Some(Value::Object(members)) => Some(repair_object(members, field)),
            _ if field.required => Some(fallback(field)),
            _ => None,
        },
        FieldType::String | FieldType::Number | FieldType::Boolean => {
            if let Some(value) = value {
                if leaf_is_valid(value, field) {
                    return Some(value.clone());
                }
            }
            if field.required {
                Some(fallback(field))
            } else {
                None
            }
        }
    }
}

fn repair_items(items: &[Value], field: &FieldSchema) -> Vec<Value> {
    match &field.item_schema {
        Some(item_schema) => items
            .iter()
            .map(|item| build_object(item.as_object(), item_schema))
            .collect(),
        None => items.to_vec(),
    }
}

fn repair_object(members: &Map<String, Value>, field: &FieldSchema) -> Value {
    match &field.schema {
        Some(schema) => build_object(Some(members), schema),
        None => Value::Object(members.clone()),
    }
}

fn leaf_is_valid(value: &Value, field: &FieldSchema) -> bool {
    if !field.field_type.matches(value) {
        return false;
    }
    if let Some(allowed) = &field.enum_values {
        if !value.as_str().is_some_and(|s| allowed.iter().any(|a| a == s)) {
            return false;
        }
    }
    if field.field_type == FieldType::Number {
        if let Some(number) = value.as_f64() {
            if field.min.is_some_and(|min| number < min) {
                return false;
            }
            if field.max.is_some_and(|max| number > max) {
                return false;
            }
        }
    }
    true
}

/// Designated default when it is itself valid, else the type sentinel.
fn fallback(field: &FieldSchema) -> Value {
    if let Some(default) = &field.default {
        match field.field_type {
            FieldType::Array => {
                if let Value::Array(items) = default {
                    return Value::Array(repair_items(items, field));
                }
            }
            FieldType::Object => {
                if let Value::Object(members) = default {
                    return repair_object(members, field);
                }
            }
            FieldType::String | FieldType::Number | FieldType::Boolean => {
                if leaf_is_valid(default, field) {
                    return default.clone();
                }
            }
        }
    }
    type_sentinel(field)
}

fn type_sentinel(field: &FieldSchema) -> Value {
    match field.field_type {
        FieldType::String => field
            .enum_values
            .as_ref()
            .and_then(|values| values.first())
            .map_or_else(|| Value::String(String::new()), |first| Value::String(first.clone())),
        FieldType::Number => {
            let mut number = 0.0;
            if let Some(min) = field.min {
                if number < min {
                    number = min;
                }
            }
            if let Some(max) = field.max {
                if number > max {
                    number = max;
                }
            }
            Value::from(number)
        }
        FieldType::Boolean => Value::Bool(false),
        FieldType::Array => Value::Array(Vec::new()),
        FieldType::Object => field
            .schema
            .as_ref()
            .map_or_else(|| Value::Object(Map::new()), |schema| build_object(None, schema)),
    }
}
