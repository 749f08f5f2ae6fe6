// ABOUTME: Tool registry route handlers for discovery and execution over HTTP
// ABOUTME: Exposes registered tool definitions and the validated dispatch pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Tool registry routes
//!
//! `GET /api/tools` lists the declared contract of every registered tool so
//! orchestrators can compose calls without out-of-band knowledge.
//! `POST /api/tools/execute` runs one tool call through the registry's full
//! pre-execution pipeline: malformed requests come back as structured
//! `success: false` results, while unknown tools and approval-gated tools
//! map to HTTP errors through the error taxonomy.

use crate::{
    errors::AppError,
    server::ServerResources,
    tools::{ToolExecutionContext, ToolExecutionResult},
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// One tool invocation submitted by an orchestrator
#[derive(Debug, Deserialize)]
pub struct ExecuteToolRequest {
    /// Registered tool name
    pub tool: String,
    /// Arguments, validated against the tool's declared parameter schema
    #[serde(default)]
    pub params: Value,
    /// Calling user; anonymous calls run under the nil UUID
    pub user_id: Option<Uuid>,
    /// Tenant scope, forwarded into the execution context
    pub tenant_id: Option<Uuid>,
}

/// Tool registry route handlers
pub struct ToolRoutes;

impl ToolRoutes {
    /// Create all tool registry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tools", get(Self::list_tools))
            .route("/api/tools/execute", post(Self::execute_tool))
            .with_state(resources)
    }

    /// List the declared contract of every registered tool
    async fn list_tools(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let definitions = resources.registry.definitions();
        Json(serde_json::json!({
            "tools": definitions,
            "count": resources.registry.len(),
        }))
    }

    /// Execute one tool call through the registry pipeline
    async fn execute_tool(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ExecuteToolRequest>,
    ) -> Result<Json<ToolExecutionResult>, AppError> {
        let user_id = request.user_id.unwrap_or_else(Uuid::nil);
        let token = CancellationToken::new();
        // Dropped with the handler future when the client disconnects,
        // cancelling whatever the tool still has in flight
        let _disconnect_guard = token.clone().drop_guard();
        let mut context = ToolExecutionContext::new(user_id)
            .with_request_id(Uuid::new_v4())
            .with_cancellation(token);
        if let Some(tenant_id) = request.tenant_id {
            context = context.with_tenant(tenant_id);
        }

        debug!(
            tool = %request.tool,
            user_id = %user_id,
            "Dispatching tool execution request"
        );

        let result = resources
            .registry
            .dispatch(&request.tool, request.params, &context)
            .await?;

        Ok(Json(result))
    }
}
