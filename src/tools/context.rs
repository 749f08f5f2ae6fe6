// ABOUTME: Defines ToolExecutionContext carrying per-request identity and cancellation into tools.
// ABOUTME: Replaces scattered parameter passing with a single explicit context object.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Tool Execution Context
//!
//! Per-request context handed to every tool execution:
//! - User and tenant identity
//! - Request ID for tracing
//! - A cancellation token the transport layer cancels when the caller
//!   disconnects
//!
//! The context deliberately carries no service handles. Tools receive their
//! dependencies (embedding provider, vector index, ...) at construction
//! time, so a context can be built anywhere without wiring resources
//! through.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Context provided to every tool execution
#[derive(Debug, Clone)]
pub struct ToolExecutionContext {
    /// Identity of the calling user
    pub user_id: Uuid,
    /// Tenant the call is scoped to, when multi-tenancy applies
    pub tenant_id: Option<Uuid>,
    /// Request ID for tracing/logging
    pub request_id: Option<Uuid>,
    /// Cancelled by the transport when the caller goes away
    pub cancellation: CancellationToken,
}

impl ToolExecutionContext {
    /// Create a context for `user_id` with a fresh cancellation token
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            tenant_id: None,
            request_id: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Set tenant ID
    #[must_use]
    pub const fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Set request ID for tracing
    #[must_use]
    pub const fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Attach an externally owned cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Whether the caller has abandoned this request
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fail fast when the request has been cancelled.
    ///
    /// Tools call this before and between expensive dependency calls so an
    /// abandoned request stops consuming upstream quota.
    ///
    /// # Errors
    ///
    /// Returns `RequestCancelled` once the token has been cancelled.
    pub fn ensure_active(&self) -> AppResult<()> {
        if self.cancellation.is_cancelled() {
            return Err(AppError::cancelled("Tool execution cancelled by caller"));
        }
        Ok(())
    }

    /// Get tracing span attributes for this context
    #[must_use]
    pub fn span_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("user_id", self.user_id.to_string())];

        if let Some(tenant_id) = self.tenant_id {
            attrs.push(("tenant_id", tenant_id.to_string()));
        }

        if let Some(request_id) = self.request_id {
            attrs.push(("request_id", request_id.to_string()));
        }

        attrs
    }
}
