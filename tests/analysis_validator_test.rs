// ABOUTME: Integration tests for meeting-analysis document validation
// ABOUTME: Covers error accumulation, path-qualified nested errors, and advisory warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use scribe_core::analysis::validate_meeting_analysis;
use serde_json::{json, Value};

fn action_item() -> Value {
    json!({
        "item": "Share the onboarding checklist with the new hires",
        "assigned_to": "marcus",
        "deadline": "2026-09-12",
        "priority": "high",
        "context": "Two engineers start next Monday",
        "source_quote": "I'll send the checklist around before they start.",
        "confidence": 0.85,
        "category": "explicit"
    })
}

fn complete_document() -> Value {
    json!({
        "action_items": [action_item()],
        "questions_needing_answers": ["Who owns the security review?"],
        "decisions_made": ["Ship the beta to design partners first"],
        "key_topics_discussed": ["Onboarding", "Beta rollout"],
        "next_meeting": {
            "scheduled": true,
            "date": "2026-09-08",
            "purpose": "Beta readiness review"
        },
        "analysis_metadata": {
            "total_action_items": 1,
            "high_priority_items": 1,
            "items_with_deadlines": 1,
            "analysis_thoroughness": "complete"
        }
    })
}

#[test]
fn test_complete_document_passes_clean() {
    let report = validate_meeting_analysis(&complete_document());

    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[test]
fn test_missing_optional_fields_still_valid() {
    let mut document = complete_document();
    document["action_items"][0]
        .as_object_mut()
        .unwrap()
        .remove("deadline");
    document["next_meeting"] = json!({ "scheduled": false });

    let report = validate_meeting_analysis(&document);
    assert!(report.valid, "unexpected errors: {:?}", report.errors);
}

#[test]
fn test_empty_document_reports_every_missing_field() {
    let report = validate_meeting_analysis(&json!({}));

    assert!(!report.valid);
    for field in [
        "action_items",
        "questions_needing_answers",
        "decisions_made",
        "key_topics_discussed",
        "next_meeting",
        "analysis_metadata",
    ] {
        assert!(
            report
                .errors
                .contains(&format!("Missing required field: {field}")),
            "no error for {field}: {:?}",
            report.errors
        );
    }
}

#[test]
fn test_nested_missing_field_is_path_qualified() {
    let mut document = complete_document();
    document["action_items"][0]
        .as_object_mut()
        .unwrap()
        .remove("priority");

    let report = validate_meeting_analysis(&document);

    assert!(!report.valid);
    assert!(
        report
            .errors
            .contains(&"action_items[0].priority is required but missing".to_owned()),
        "errors: {:?}",
        report.errors
    );
}

#[test]
fn test_errors_qualified_per_array_index() {
    let mut first = action_item();
    first.as_object_mut().unwrap().remove("source_quote");
    let mut third = action_item();
    third.as_object_mut().unwrap().remove("context");

    let mut document = complete_document();
    document["action_items"] = json!([first, action_item(), third]);

    let report = validate_meeting_analysis(&document);

    assert!(!report.valid);
    assert!(report
        .errors
        .contains(&"action_items[0].source_quote is required but missing".to_owned()));
    assert!(report
        .errors
        .contains(&"action_items[2].context is required but missing".to_owned()));
}

#[test]
fn test_wrong_container_types_reported() {
    let mut document = complete_document();
    document["action_items"] = json!("not a list");
    document["next_meeting"] = json!(["not", "an", "object"]);

    let report = validate_meeting_analysis(&document);

    assert!(!report.valid);
    assert!(report
        .errors
        .contains(&"action_items must be an array".to_owned()));
    assert!(report
        .errors
        .contains(&"next_meeting must be an object".to_owned()));
}

#[test]
fn test_enum_violations_list_allowed_values() {
    let mut document = complete_document();
    document["action_items"][0]["priority"] = json!("urgent");
    document["analysis_metadata"]["analysis_thoroughness"] = json!("exhaustive");

    let report = validate_meeting_analysis(&document);

    assert!(!report.valid);
    assert!(report
        .errors
        .contains(&"action_items[0].priority must be one of: high, medium, low".to_owned()));
    assert!(report.errors.contains(
        &"analysis_metadata.analysis_thoroughness must be one of: complete, partial".to_owned()
    ));
}

#[test]
fn test_confidence_range_enforced() {
    let mut document = complete_document();
    document["action_items"][0]["confidence"] = json!(1.4);

    let high = validate_meeting_analysis(&document);
    assert!(high
        .errors
        .contains(&"action_items[0].confidence must be <= 1".to_owned()));

    document["action_items"][0]["confidence"] = json!(-0.1);
    let low = validate_meeting_analysis(&document);
    assert!(low
        .errors
        .contains(&"action_items[0].confidence must be >= 0".to_owned()));
}

#[test]
fn test_all_defects_accumulate_in_one_pass() {
    let mut document = complete_document();
    document
        .as_object_mut()
        .unwrap()
        .remove("decisions_made");
    document["action_items"][0]["priority"] = json!("urgent");
    document["action_items"][0]["confidence"] = json!(2.0);
    document["next_meeting"]["scheduled"] = json!("yes");

    let report = validate_meeting_analysis(&document);

    assert!(!report.valid);
    assert!(
        report.errors.len() >= 4,
        "expected every defect reported, got {:?}",
        report.errors
    );
    assert!(report
        .errors
        .contains(&"Missing required field: decisions_made".to_owned()));
    assert!(report
        .errors
        .contains(&"next_meeting.scheduled must be a boolean".to_owned()));
}

#[test]
fn test_warnings_never_invalidate() {
    let mut document = complete_document();
    document["action_items"] = json!([]);
    document["analysis_metadata"]["total_action_items"] = json!(0);
    document["analysis_metadata"]["high_priority_items"] = json!(0);
    document["analysis_metadata"]["items_with_deadlines"] = json!(0);

    let report = validate_meeting_analysis(&document);

    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    assert!(report
        .warnings
        .contains(&"action_items is empty".to_owned()));
}

#[test]
fn test_short_item_text_warns_but_stays_valid() {
    let mut short = action_item();
    short["item"] = json!("Ping Sam");

    let mut document = complete_document();
    document["action_items"] = json!([action_item(), short]);

    let report = validate_meeting_analysis(&document);

    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    assert!(report
        .warnings
        .contains(&"action_items[1].item is implausibly short".to_owned()));
}

#[test]
fn test_non_object_document_rejected() {
    let report = validate_meeting_analysis(&json!(["a", "list"]));
    assert!(!report.valid);
    assert!(!report.errors.is_empty());
}
