// ABOUTME: Analysis route handlers streaming validation and repair results over SSE
// ABOUTME: Drives the streaming relay from document intake through the terminal sanitized payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Analysis streaming routes
//!
//! `POST /api/analysis/stream` takes the orchestrator's raw structured
//! output and answers over server-sent events: one `chunk` frame carrying
//! the validation report of the document as submitted, then the `complete`
//! frame carrying the sanitized document. Session title derivation runs
//! after the terminal frame as an out-of-band followup; its outcome never
//! reaches the stream.

use crate::{
    analysis::{derive_session_title, sanitize_meeting_analysis, validate_meeting_analysis},
    errors::AppError,
    server::ServerResources,
    streaming::StreamingRelay,
};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::post,
    Json, Router,
};
use futures_util::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, sync::Arc};
use tracing::info;
use uuid::Uuid;

/// Raw structured output submitted for validation and repair
#[derive(Debug, Deserialize)]
pub struct AnalyzeDocumentRequest {
    /// Document produced by the upstream model, taken as-is
    pub document: Value,
    /// Calling user; anonymous submissions run under the nil UUID
    pub user_id: Option<Uuid>,
}

/// Analysis streaming route handlers
pub struct AnalysisRoutes;

impl AnalysisRoutes {
    /// Create all analysis routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/analysis/stream", post(Self::stream_analysis))
            .with_state(resources)
    }

    /// Validate, sanitize, and stream the results of one document
    async fn stream_analysis(
        State(_resources): State<Arc<ServerResources>>,
        Json(request): Json<AnalyzeDocumentRequest>,
    ) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
        let user_id = request.user_id.unwrap_or_else(Uuid::nil);
        let (mut relay, mut receiver) = StreamingRelay::channel();

        let report = validate_meeting_analysis(&request.document);
        info!(
            user_id = %user_id,
            valid = report.valid,
            error_count = report.errors.len(),
            warning_count = report.warnings.len(),
            "Validated incoming analysis document"
        );

        let sanitized = sanitize_meeting_analysis(&request.document);
        let title = derive_session_title(&sanitized);

        relay.emit_chunk(json!({ "validation": report }))?;
        relay.complete_with_followup(json!({ "document": sanitized }), async move {
            info!(user_id = %user_id, title = %title, "Derived session title for analysis");
            Ok(())
        })?;
        drop(relay);

        // Receiver drains the buffered events, then ends once the relay's
        // sender is gone.
        let stream = async_stream::stream! {
            while let Some(event) = receiver.recv().await {
                yield Ok(Event::default().data(event.to_json()));
            }
        };

        Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
    }
}
