// ABOUTME: Defines the AssistantTool trait and ToolDefinition descriptor for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and dispatched via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Assistant Tool Trait and Definitions
//!
//! This module defines the core abstraction for assistant tools. All tools
//! implement the `AssistantTool` trait which provides:
//! - An immutable [`ToolDefinition`] (name, description, category, approval
//!   gate, declared parameter schema)
//! - Async execution with an injected context
//! - An optional idempotency key for suppressing duplicate side effects
//!
//! The declared parameter schema is enforced by the registry before a tool
//! ever runs: missing required parameters, wrong-typed values, and
//! undeclared parameters are all rejected up front, never silently coerced.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::AppResult;

use super::context::ToolExecutionContext;
use super::result::ToolExecutionResult;

/// JSON type a declared parameter must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// UTF-8 string
    String,
    /// Any JSON number
    Number,
    /// Boolean flag
    Boolean,
    /// Nested JSON object
    Object,
    /// JSON array
    Array,
}

impl ParameterType {
    /// Human-readable type name used in violation messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether `value` holds this type
    #[must_use]
    pub const fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => matches!(value, Value::String(_)),
            Self::Number => matches!(value, Value::Number(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Object => matches!(value, Value::Object(_)),
            Self::Array => matches!(value, Value::Array(_)),
        }
    }
}

/// Declared schema for one tool parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    /// Required JSON type
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    /// Whether callers must supply this parameter
    pub required: bool,
    /// Human-readable description shown to the orchestrating model
    pub description: String,
}

impl ParameterSpec {
    /// A parameter callers must supply
    #[must_use]
    pub fn required(param_type: ParameterType, description: impl Into<String>) -> Self {
        Self {
            param_type,
            required: true,
            description: description.into(),
        }
    }

    /// A parameter callers may omit
    #[must_use]
    pub fn optional(param_type: ParameterType, description: impl Into<String>) -> Self {
        Self {
            param_type,
            required: false,
            description: description.into(),
        }
    }
}

/// Immutable descriptor of one tool.
///
/// Definitions are what the registry lists to the orchestrator for tool
/// selection; the `parameter_schema` doubles as the pre-dispatch validation
/// contract. `BTreeMap` keeps parameter listing order deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique name within a registry (e.g. `search_knowledge`)
    pub name: String,
    /// Human-readable description for model consumption
    pub description: String,
    /// Category tag for grouping and discovery
    pub category: String,
    /// Whether a human must confirm before the tool may run
    pub requires_approval: bool,
    /// Declared parameters by name
    pub parameter_schema: BTreeMap<String, ParameterSpec>,
}

impl ToolDefinition {
    /// Create a definition with no parameters and no approval gate
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            requires_approval: false,
            parameter_schema: BTreeMap::new(),
        }
    }

    /// Declare a parameter
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameter_schema.insert(name.into(), spec);
        self
    }

    /// Gate execution behind human approval
    #[must_use]
    pub const fn with_approval_required(mut self) -> Self {
        self.requires_approval = true;
        self
    }
}

/// The main trait that all assistant tools must implement.
///
/// Tools are registered with the `ToolRegistry` and dispatched uniformly:
/// the registry resolves the tool, enforces the approval gate, validates
/// parameters against the declared schema, and only then calls `execute`.
///
/// # Design Notes
///
/// - Tools are `Send + Sync` for safe sharing across async tasks
/// - Tools receive their dependencies at construction; the context carries
///   per-request identity and cancellation, never service handles
/// - A *recoverable* dependency failure must be reported as a successful,
///   degraded result with a `warning`; `success: false` is reserved for
///   malformed caller requests, and hard `Err` for configuration defects
///   and cancellation
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use scribe_core::errors::AppResult;
/// use scribe_core::tools::{
///     AssistantTool, ToolDefinition, ToolExecutionContext, ToolExecutionResult,
/// };
/// use serde_json::Value;
///
/// struct EchoTool;
///
/// #[async_trait]
/// impl AssistantTool for EchoTool {
///     fn describe(&self) -> ToolDefinition {
///         ToolDefinition::new("echo", "Echo the provided parameters", "diagnostics")
///     }
///
///     async fn execute(
///         &self,
///         params: Value,
///         _context: &ToolExecutionContext,
///     ) -> AppResult<ToolExecutionResult> {
///         Ok(ToolExecutionResult::ok("echo", params))
///     }
/// }
/// ```
#[async_trait]
pub trait AssistantTool: Send + Sync {
    /// Immutable descriptor used for listing, selection, and pre-dispatch
    /// parameter validation
    fn describe(&self) -> ToolDefinition;

    /// Execute the tool with validated parameters and request context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for configuration defects and cancellation.
    /// Dependency failures and malformed requests are reported inside the
    /// returned [`ToolExecutionResult`] instead.
    async fn execute(
        &self,
        params: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolExecutionResult>;

    /// Idempotency key derived from the parameters, if this tool wants
    /// duplicate concurrent invocations suppressed.
    ///
    /// The registry holds the key for the duration of the call; a second
    /// dispatch with the same key is rejected while the first is in flight.
    fn idempotency_key(&self, params: &Value) -> Option<String> {
        let _ = params;
        None
    }
}
