// ABOUTME: Meeting-analysis document schema with quality heuristics and derived counts
// ABOUTME: Binds the generic validator/sanitizer to the Scribe meeting artifact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Meeting Analysis Documents
//!
//! The meeting-analysis artifact is the structured output the assistant
//! produces from a transcript: action items, open questions, decisions,
//! topics, follow-up meeting details, and analysis metadata. Model output
//! arrives untrusted, so every document passes through
//! [`validate_meeting_analysis`] for reporting and
//! [`sanitize_meeting_analysis`] before delivery.
//!
//! Sanitization additionally recomputes the `analysis_metadata` counts from
//! the repaired `action_items` array. Models routinely emit counts that
//! disagree with the arrays they summarize; the arrays win.

use super::sanitizer::sanitize;
use super::schema::{DocumentSchema, FieldSchema, ValidationResult};
use super::validator::validate;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Action items below this confidence are counted as low-confidence
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Action item text shorter than this is flagged as implausibly short
const MIN_ITEM_TEXT_CHARS: usize = 10;

/// Derived session titles are truncated to this many characters
const MAX_TITLE_CHARS: usize = 80;

/// Title used when a document yields no topic or action item to name it by
const FALLBACK_SESSION_TITLE: &str = "Meeting analysis";

/// Schema for one entry of `action_items`
fn action_item_schema() -> DocumentSchema {
    let mut item = BTreeMap::new();
    item.insert("item".to_owned(), FieldSchema::string(true));
    item.insert(
        "assigned_to".to_owned(),
        FieldSchema::string(true).with_default(json!("unassigned")),
    );
    item.insert("deadline".to_owned(), FieldSchema::string(false));
    item.insert(
        "priority".to_owned(),
        FieldSchema::string(true)
            .with_enum(&["high", "medium", "low"])
            .with_default(json!("medium")),
    );
    item.insert("context".to_owned(), FieldSchema::string(true));
    item.insert("source_quote".to_owned(), FieldSchema::string(true));
    item.insert(
        "confidence".to_owned(),
        FieldSchema::number(true)
            .with_range(0.0, 1.0)
            .with_default(json!(0.5)),
    );
    item.insert(
        "category".to_owned(),
        FieldSchema::string(true)
            .with_enum(&[
                "explicit",
                "implicit",
                "question",
                "document",
                "access",
                "introduction",
                "review",
            ])
            .with_default(json!("explicit")),
    );
    item
}

fn next_meeting_schema() -> DocumentSchema {
    let mut members = BTreeMap::new();
    members.insert(
        "scheduled".to_owned(),
        FieldSchema::boolean(true).with_default(json!(false)),
    );
    members.insert("date".to_owned(), FieldSchema::string(false));
    members.insert("purpose".to_owned(), FieldSchema::string(false));
    members
}

fn analysis_metadata_schema() -> DocumentSchema {
    let mut members = BTreeMap::new();
    members.insert("total_action_items".to_owned(), FieldSchema::number(true));
    members.insert("high_priority_items".to_owned(), FieldSchema::number(true));
    members.insert("items_with_deadlines".to_owned(), FieldSchema::number(true));
    members.insert(
        "analysis_thoroughness".to_owned(),
        FieldSchema::string(true)
            .with_enum(&["complete", "partial"])
            .with_default(json!("partial")),
    );
    members
}

/// Full meeting-analysis document schema
#[must_use]
pub fn meeting_analysis_schema() -> DocumentSchema {
    let mut schema = BTreeMap::new();
    schema.insert(
        "action_items".to_owned(),
        FieldSchema::array_of(true, action_item_schema()),
    );
    schema.insert(
        "questions_needing_answers".to_owned(),
        FieldSchema::array(true),
    );
    schema.insert("decisions_made".to_owned(), FieldSchema::array(true));
    schema.insert("key_topics_discussed".to_owned(), FieldSchema::array(true));
    schema.insert(
        "next_meeting".to_owned(),
        FieldSchema::object(true, next_meeting_schema()),
    );
    schema.insert(
        "analysis_metadata".to_owned(),
        FieldSchema::object(true, analysis_metadata_schema()),
    );
    schema
}

/// Validate a meeting-analysis document.
///
/// Structural errors come from the generic validator; domain quality
/// heuristics are layered on as warnings and never affect `valid`.
#[must_use]
pub fn validate_meeting_analysis(document: &Value) -> ValidationResult {
    validate(document, &meeting_analysis_schema()).with_warnings(quality_warnings(document))
}

/// Repair a meeting-analysis document into a schema-valid one.
///
/// After structural repair the `analysis_metadata` counts are recomputed
/// from the repaired `action_items`, so the metadata always agrees with the
/// arrays it describes.
#[must_use]
pub fn sanitize_meeting_analysis(document: &Value) -> Value {
    let mut repaired = sanitize(document, &meeting_analysis_schema());
    recompute_metadata(&mut repaired);
    repaired
}

/// Quality heuristics over `action_items`, tolerant of malformed input.
fn quality_warnings(document: &Value) -> Vec<String> {
    let mut warnings = Vec::new();
    let Some(items) = document.get("action_items").and_then(Value::as_array) else {
        return warnings;
    };

    if items.is_empty() {
        warnings.push("action_items is empty".to_owned());
        return warnings;
    }

    let low_confidence = items
        .iter()
        .filter(|item| {
            item.get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(0.0)
                < LOW_CONFIDENCE_THRESHOLD
        })
        .count();
    if low_confidence * 2 > items.len() {
        warnings.push(format!(
            "{low_confidence} of {} action items fall below confidence {LOW_CONFIDENCE_THRESHOLD}",
            items.len()
        ));
    }

    for (index, item) in items.iter().enumerate() {
        if let Some(text) = item.get("item").and_then(Value::as_str) {
            if text.chars().count() < MIN_ITEM_TEXT_CHARS {
                warnings.push(format!("action_items[{index}].item is implausibly short"));
            }
        }
    }

    warnings
}

/// Overwrite `analysis_metadata` counts with values derived from the
/// repaired `action_items` array.
fn recompute_metadata(document: &mut Value) {
    let (total, high_priority, with_deadlines) = match document.get("action_items") {
        Some(Value::Array(items)) => (
            items.len(),
            items
                .iter()
                .filter(|item| item.get("priority").and_then(Value::as_str) == Some("high"))
                .count(),
            items
                .iter()
                .filter(|item| {
                    item.get("deadline")
                        .and_then(Value::as_str)
                        .is_some_and(|deadline| !deadline.is_empty())
                })
                .count(),
        ),
        _ => (0, 0, 0),
    };

    if let Some(metadata) = document
        .get_mut("analysis_metadata")
        .and_then(Value::as_object_mut)
    {
        metadata.insert("total_action_items".to_owned(), json!(total));
        metadata.insert("high_priority_items".to_owned(), json!(high_priority));
        metadata.insert("items_with_deadlines".to_owned(), json!(with_deadlines));
    }
}

/// Derive a short session title from an analysis document.
///
/// Prefers the first discussed topic, falls back to the first action item,
/// then to a fixed title.
#[must_use]
pub fn derive_session_title(document: &Value) -> String {
    let topic = document
        .get("key_topics_discussed")
        .and_then(Value::as_array)
        .and_then(|topics| topics.first())
        .and_then(Value::as_str)
        .filter(|topic| !topic.trim().is_empty());

    let first_item = document
        .get("action_items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| item.get("item"))
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty());

    let title = topic
        .or(first_item)
        .unwrap_or(FALLBACK_SESSION_TITLE)
        .trim();

    if title.chars().count() <= MAX_TITLE_CHARS {
        title.to_owned()
    } else {
        let truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}…", truncated.trim_end())
    }
}
