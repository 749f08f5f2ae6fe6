// ABOUTME: HTTP integration tests for the streaming analysis endpoint
// ABOUTME: Covers SSE framing, the chunk-then-terminal shape, and document repair on the wire
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::Router;
use helpers::axum_test::AxumTestRequest;
use scribe_core::analysis::validate_meeting_analysis;
use scribe_core::config::environment::{EmbeddingConfig, ServerConfig, VectorIndexConfig};
use scribe_core::server::{HttpServer, ServerResources};
use scribe_core::streaming::{SseFrameBuffer, StreamEvent};
use scribe_core::tools::ToolRegistry;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

fn app() -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        embedding: EmbeddingConfig::default(),
        vector_index: VectorIndexConfig::default(),
    };
    let resources = Arc::new(ServerResources::new(ToolRegistry::new(), config));
    HttpServer::new(resources).router()
}

/// POST a document and decode the SSE body back into stream events
async fn stream_document(document: Value) -> (u16, Vec<StreamEvent>) {
    let response = AxumTestRequest::post("/api/analysis/stream")
        .json(&json!({ "document": document, "user_id": Uuid::new_v4() }))
        .send(app())
        .await;

    let status = response.status();
    let mut parser = SseFrameBuffer::new();
    let mut events = parser.feed(&response.bytes());
    events.extend(parser.flush());
    (status, events)
}

#[tokio::test]
async fn test_stream_answers_as_server_sent_events() {
    let response = AxumTestRequest::post("/api/analysis/stream")
        .json(&json!({ "document": {} }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("content-type").as_deref(),
        Some("text/event-stream")
    );
    assert_eq!(response.header("cache-control").as_deref(), Some("no-cache"));
}

#[tokio::test]
async fn test_stream_is_one_chunk_then_complete() {
    let (status, events) = stream_document(json!({})).await;

    assert_eq!(status, 200);
    assert_eq!(events.len(), 2, "unexpected events: {events:?}");
    assert!(matches!(events[0], StreamEvent::Chunk { .. }));
    assert!(events[1].is_terminal());
}

#[tokio::test]
async fn test_validation_chunk_reports_defects_of_submitted_document() {
    let document = json!({
        "action_items": [{ "item": "Circulate the audit findings" }]
    });

    let (_status, events) = stream_document(document).await;

    let StreamEvent::Chunk { data } = &events[0] else {
        panic!("expected validation chunk, got {:?}", events[0]);
    };
    let validation = &data["validation"];
    assert_eq!(validation["valid"], false);
    let errors = validation["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("action_items[0].priority is required but missing")));
    assert!(errors.contains(&json!("Missing required field: next_meeting")));
}

#[tokio::test]
async fn test_complete_event_carries_repaired_document() {
    let document = json!({
        "action_items": [{ "item": "Circulate the audit findings", "priority": "urgent" }],
        "hallucinated_field": true
    });

    let (_status, events) = stream_document(document).await;

    let StreamEvent::Complete { data } = &events[1] else {
        panic!("expected complete event, got {:?}", events[1]);
    };
    let repaired = &data["document"];

    let report = validate_meeting_analysis(repaired);
    assert!(report.valid, "repaired document has errors: {:?}", report.errors);

    assert_eq!(repaired["action_items"][0]["priority"], "medium");
    assert_eq!(repaired["analysis_metadata"]["total_action_items"], 1);
    assert!(repaired.get("hallucinated_field").is_none());
}

#[tokio::test]
async fn test_valid_document_passes_through_unchanged() {
    let document = json!({
        "action_items": [{
            "item": "Send the revised pricing deck to finance",
            "assigned_to": "ana",
            "deadline": "2026-09-01",
            "priority": "high",
            "context": "Finance needs it before the board review",
            "source_quote": "I'll get the deck over by the first.",
            "confidence": 0.9,
            "category": "explicit"
        }],
        "questions_needing_answers": [],
        "decisions_made": ["Adopt usage-based pricing"],
        "key_topics_discussed": ["Pricing methodology"],
        "next_meeting": { "scheduled": true, "date": "2026-09-08" },
        "analysis_metadata": {
            "total_action_items": 1,
            "high_priority_items": 1,
            "items_with_deadlines": 1,
            "analysis_thoroughness": "complete"
        }
    });

    let (_status, events) = stream_document(document.clone()).await;

    let StreamEvent::Chunk { data } = &events[0] else {
        panic!("expected validation chunk, got {:?}", events[0]);
    };
    assert_eq!(data["validation"]["valid"], true);

    let StreamEvent::Complete { data } = &events[1] else {
        panic!("expected complete event, got {:?}", events[1]);
    };
    assert_eq!(data["document"], document);
}

#[tokio::test]
async fn test_anonymous_submission_is_accepted() {
    let response = AxumTestRequest::post("/api/analysis/stream")
        .json(&json!({ "document": { "action_items": [] } }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_request_without_document_field_is_rejected() {
    let response = AxumTestRequest::post("/api/analysis/stream")
        .json(&json!({ "user_id": Uuid::new_v4() }))
        .send(app())
        .await;

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let response = AxumTestRequest::post("/api/analysis/stream")
        .raw_body("{not json", "application/json")
        .send(app())
        .await;

    assert_eq!(response.status(), 400);
}
