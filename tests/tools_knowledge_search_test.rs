// ABOUTME: Integration tests for the knowledge search tool over stub providers
// ABOUTME: Covers cutoff filtering, confidence scoring, degraded mode, and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::stub_providers::{search_match, StubEmbedding, StubVectorIndex};
use scribe_core::errors::ErrorCode;
use scribe_core::external::{EmbeddingProvider, VectorIndexProvider};
use scribe_core::tools::{AssistantTool, KnowledgeSearchTool, ToolExecutionContext};
use serde_json::{json, Map};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

fn context() -> ToolExecutionContext {
    ToolExecutionContext::new(Uuid::new_v4())
}

/// Tool over stubs answering the classic five-match retrieval
fn tool_with_scores(scores: &[f64]) -> (KnowledgeSearchTool, Arc<StubVectorIndex>) {
    let matches = scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            search_match(
                &format!("doc-{i}"),
                *score,
                json!({ "title": format!("Document {i}"), "sourceType": "meeting" }),
            )
        })
        .collect();
    let embedding = Arc::new(StubEmbedding::returning(vec![0.1, 0.2, 0.3]));
    let index = Arc::new(StubVectorIndex::returning(matches));
    let tool =
        KnowledgeSearchTool::new(embedding, Arc::clone(&index) as Arc<dyn VectorIndexProvider>);
    (tool, index)
}

// ============================================================================
// Cutoff filtering and confidence
// ============================================================================

#[tokio::test]
async fn test_explicit_cutoff_drops_low_scores_and_scores_confidence() {
    let (tool, _index) = tool_with_scores(&[0.92, 0.85, 0.79, 0.6, 0.5]);

    let result = tool
        .execute(
            json!({ "query": "pricing methodology", "topK": 5, "minSimilarity": 0.8 }),
            &context(),
        )
        .await
        .unwrap();

    assert!(result.success);
    assert!(!result.degraded);
    assert_eq!(result.data["count"], 2);
    assert_eq!(result.data["results"][0]["id"], "doc-0");
    assert_eq!(result.data["results"][1]["id"], "doc-1");
    assert_eq!(result.data["query"], "pricing methodology");

    // avg(0.92, 0.85) = 0.885 -> 0.5 + 0.885 * 0.4 = 0.854
    let confidence = result.confidence.unwrap();
    assert!(
        (confidence - 0.854).abs() < 1e-9,
        "confidence was {confidence}"
    );

    assert_eq!(result.data_points.len(), 2);
    assert_eq!(result.data_points[0].title, "Document 0");
    assert_eq!(result.data_points[0].source, "meeting");
    assert!((result.data_points[0].relevance - 0.92).abs() < 1e-9);
}

#[tokio::test]
async fn test_default_cutoff_is_0_7() {
    let (tool, _index) = tool_with_scores(&[0.92, 0.85, 0.79, 0.6, 0.5]);

    let result = tool
        .execute(json!({ "query": "pricing methodology" }), &context())
        .await
        .unwrap();

    assert_eq!(result.data["count"], 3);
}

#[tokio::test]
async fn test_no_survivors_is_success_with_zero_confidence() {
    let (tool, _index) = tool_with_scores(&[0.4, 0.3]);

    let result = tool
        .execute(json!({ "query": "anything" }), &context())
        .await
        .unwrap();

    assert!(result.success);
    assert!(!result.degraded);
    assert!(result.warning.is_none());
    assert_eq!(result.data["count"], 0);
    assert!((result.confidence.unwrap() - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_result_entries_carry_metadata_with_fallbacks() {
    let embedding = Arc::new(StubEmbedding::returning(vec![1.0]));
    let index = Arc::new(StubVectorIndex::returning(vec![search_match(
        "doc-1",
        0.9,
        json!({ "content": "Q3 pricing notes", "sourceId": "meeting-77" }),
    )]));
    let tool = KnowledgeSearchTool::new(embedding, index);

    let result = tool
        .execute(json!({ "query": "pricing" }), &context())
        .await
        .unwrap();

    let entry = &result.data["results"][0];
    assert_eq!(entry["content"], "Q3 pricing notes");
    assert_eq!(entry["sourceId"], "meeting-77");
    assert_eq!(entry["title"], "Untitled");
    assert_eq!(entry["sourceType"], "unknown");
}

// ============================================================================
// Parameter forwarding
// ============================================================================

#[tokio::test]
async fn test_top_k_and_filter_are_forwarded_to_the_index() {
    let (tool, index) = tool_with_scores(&[0.9]);
    let filter = json!({ "sourceType": "meeting_summary" });

    tool.execute(
        json!({ "query": "roadmap", "topK": 3, "filter": filter }),
        &context(),
    )
    .await
    .unwrap();

    let queries = index.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].top_k, 3);
    assert_eq!(
        queries[0].filter,
        Some(json!({ "sourceType": "meeting_summary" }))
    );
}

#[tokio::test]
async fn test_unfiltered_query_sends_no_filter() {
    let (tool, index) = tool_with_scores(&[0.9]);

    tool.execute(json!({ "query": "roadmap" }), &context())
        .await
        .unwrap();

    assert!(index.queries.lock().unwrap()[0].filter.is_none());
}

// ============================================================================
// Malformed requests
// ============================================================================

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let (tool, index) = tool_with_scores(&[0.9]);

    let result = tool
        .execute(json!({ "query": "   " }), &context())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("query must not be empty"));
    assert!(index.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_top_k_is_rejected() {
    let (tool, _index) = tool_with_scores(&[0.9]);

    let result = tool
        .execute(json!({ "query": "roadmap", "topK": 0 }), &context())
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("topK must be a positive integer")
    );
}

#[tokio::test]
async fn test_out_of_range_cutoff_is_rejected() {
    let (tool, _index) = tool_with_scores(&[0.9]);

    let result = tool
        .execute(
            json!({ "query": "roadmap", "minSimilarity": 1.5 }),
            &context(),
        )
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("minSimilarity must be between 0 and 1")
    );
}

// ============================================================================
// Degraded mode
// ============================================================================

#[tokio::test]
async fn test_embedding_outage_degrades_instead_of_failing() {
    let embedding = Arc::new(StubEmbedding::failing(ErrorCode::ExternalServiceUnavailable));
    let index = Arc::new(StubVectorIndex::returning(vec![search_match(
        "doc-1",
        0.9,
        json!({}),
    )]));
    let tool =
        KnowledgeSearchTool::new(embedding, Arc::clone(&index) as Arc<dyn VectorIndexProvider>);

    let result = tool
        .execute(json!({ "query": "pricing" }), &context())
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.degraded);
    assert!((result.confidence.unwrap() - 0.0).abs() < f64::EPSILON);
    assert_eq!(result.data["results"], json!([]));
    assert_eq!(result.data["count"], 0);
    assert_eq!(result.data["query"], "pricing");
    assert_eq!(
        result.warning.as_deref(),
        Some("Knowledge base unavailable: stub embedding failure")
    );
    // The index was never reached
    assert!(index.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_index_outage_degrades_instead_of_failing() {
    let embedding = Arc::new(StubEmbedding::returning(vec![0.5]));
    let index = Arc::new(StubVectorIndex::failing(ErrorCode::ExternalServiceTimeout));
    let tool = KnowledgeSearchTool::new(embedding, index);

    let result = tool
        .execute(json!({ "query": "pricing" }), &context())
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.degraded);
    assert_eq!(
        result.warning.as_deref(),
        Some("Knowledge base unavailable: stub index failure")
    );
}

#[tokio::test]
async fn test_configuration_errors_propagate_as_hard_failures() {
    let embedding = Arc::new(StubEmbedding::failing(ErrorCode::ConfigInvalid));
    let index = Arc::new(StubVectorIndex::returning(Vec::new()));
    let tool = KnowledgeSearchTool::new(embedding, index);

    let error = tool
        .execute(json!({ "query": "pricing" }), &context())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancelled_context_stops_before_any_provider_call() {
    let embedding = Arc::new(StubEmbedding::returning(vec![0.5]));
    let index = Arc::new(StubVectorIndex::returning(Vec::new()));
    let tool = KnowledgeSearchTool::new(
        Arc::clone(&embedding) as Arc<dyn EmbeddingProvider>,
        Arc::clone(&index) as Arc<dyn VectorIndexProvider>,
    );

    let token = CancellationToken::new();
    token.cancel();
    let context = ToolExecutionContext::new(Uuid::new_v4()).with_cancellation(token);

    let error = tool
        .execute(json!({ "query": "pricing" }), &context)
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::RequestCancelled);
    assert!(embedding.inputs.lock().unwrap().is_empty());
    assert!(index.queries.lock().unwrap().is_empty());
}

// ============================================================================
// Indexing path
// ============================================================================

#[tokio::test]
async fn test_upsert_embeds_and_stores_content_metadata() {
    let embedding = Arc::new(StubEmbedding::returning(vec![0.1, 0.2]));
    let index = Arc::new(StubVectorIndex::returning(Vec::new()));
    let tool =
        KnowledgeSearchTool::new(embedding, Arc::clone(&index) as Arc<dyn VectorIndexProvider>);

    let mut metadata = Map::new();
    metadata.insert("title".to_owned(), json!("Kickoff"));

    let accepted = tool
        .upsert_content("rec-1", "decisions from the kickoff", metadata)
        .await
        .unwrap();

    assert_eq!(accepted, 1);
    let upserts = index.upserts.lock().unwrap();
    assert_eq!(upserts.len(), 1);
    assert_eq!(upserts[0][0].id, "rec-1");
    assert_eq!(upserts[0][0].values, vec![0.1, 0.2]);
    assert_eq!(
        upserts[0][0].metadata.get("content"),
        Some(&json!("decisions from the kickoff"))
    );
    assert_eq!(upserts[0][0].metadata.get("title"), Some(&json!("Kickoff")));
}

#[tokio::test]
async fn test_upsert_propagates_index_failures() {
    let embedding = Arc::new(StubEmbedding::returning(vec![0.1]));
    let index = Arc::new(StubVectorIndex::failing(ErrorCode::ExternalServiceError));
    let tool = KnowledgeSearchTool::new(embedding, index);

    let error = tool
        .upsert_content("rec-1", "content", Map::new())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}
