// ABOUTME: Central registry for assistant tools with schema validation and uniform dispatch.
// ABOUTME: Enforces approval gates, declared parameters, and idempotency before any tool runs.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Tool Registry
//!
//! Central registry for assistant tools, providing:
//! - Tool registration and lookup (duplicate names are a hard error)
//! - Category listing for discovery
//! - Uniform dispatch: approval gate, declared-parameter validation, and
//!   idempotency guarding happen here, before a tool ever executes
//!
//! # Thread Safety
//!
//! The registry is built once at startup, then shared immutably behind an
//! `Arc`. Only the in-flight idempotency set mutates afterwards, behind a
//! `Mutex` held strictly between awaits.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::AppResult;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::result::ToolExecutionResult;
use super::traits::{AssistantTool, ToolDefinition};

/// One declared-parameter violation found before dispatch
#[derive(Debug, Clone, Serialize)]
pub struct ParameterViolation {
    /// Offending parameter name
    pub parameter: String,
    /// Why the value was rejected
    pub reason: String,
}

/// Central registry for assistant tools
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn AssistantTool>>,
    /// Tool names grouped by their declared category
    categories: HashMap<String, Vec<String>>,
    /// Idempotency keys of invocations currently in flight
    in_flight: Mutex<HashSet<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            categories: HashMap::new(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Register a tool under the name its definition declares.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a tool with the same name is
    /// already registered. Two implementations competing for one name is a
    /// wiring defect, never something to resolve silently at runtime.
    pub fn register(&mut self, tool: Arc<dyn AssistantTool>) -> AppResult<()> {
        let definition = tool.describe();

        if self.tools.contains_key(&definition.name) {
            return Err(ToolError::already_registered(&definition.name).into());
        }

        debug!(
            tool = %definition.name,
            category = %definition.category,
            requires_approval = definition.requires_approval,
            "Registering tool"
        );
        self.categories
            .entry(definition.category.clone())
            .or_default()
            .push(definition.name.clone());
        self.tools.insert(definition.name, tool);
        Ok(())
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn AssistantTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool names
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// List all categories
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// List tool names in a specific category
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// List every tool definition, sorted by name for stable output
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|tool| tool.describe()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Dispatch a tool call through the full pre-execution pipeline.
    ///
    /// 1. Resolve the tool (missing tool = configuration error)
    /// 2. Enforce the approval gate
    /// 3. Validate parameters against the declared schema; violations come
    ///    back as a `success: false` result without executing the tool
    /// 4. Guard against duplicate in-flight invocations when the tool
    ///    declares an idempotency key
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the tool is unknown, requires approval, or
    /// its execution fails with a non-recoverable error.
    pub async fn dispatch(
        &self,
        name: &str,
        params: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolExecutionResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        let definition = tool.describe();

        if definition.requires_approval {
            warn!(tool = %name, "Blocked dispatch of approval-gated tool");
            return Err(ToolError::approval_required(name).into());
        }

        self.run(tool, &definition, params, context).await
    }

    /// Dispatch a tool call whose approval requirement has already been
    /// satisfied by a human.
    ///
    /// Identical to [`dispatch`](Self::dispatch) except the approval gate
    /// is skipped; parameter validation and idempotency still apply.
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the tool is unknown or its execution fails
    /// with a non-recoverable error.
    pub async fn dispatch_approved(
        &self,
        name: &str,
        params: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolExecutionResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        let definition = tool.describe();
        self.run(tool, &definition, params, context).await
    }

    async fn run(
        &self,
        tool: &Arc<dyn AssistantTool>,
        definition: &ToolDefinition,
        params: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolExecutionResult> {
        let violations = parameter_violations(definition, &params);
        if !violations.is_empty() {
            warn!(
                tool = %definition.name,
                violations = violations.len(),
                "Rejected tool call failing declared-parameter validation"
            );
            return Ok(validation_failure(&definition.name, &violations));
        }

        let _guard = match tool.idempotency_key(&params) {
            Some(key) => {
                let scoped_key = format!("{}:{key}", definition.name);
                match self.try_begin(scoped_key) {
                    Some(guard) => Some(guard),
                    None => {
                        let error = ToolError::duplicate_invocation(&definition.name, &key);
                        warn!(tool = %definition.name, idempotency_key = %key, "Suppressed duplicate invocation");
                        return Ok(ToolExecutionResult::rejected(
                            definition.name.clone(),
                            json!({ "idempotencyKey": key }),
                        )
                        .with_message(error.to_string()));
                    }
                }
            }
            None => None,
        };

        debug!(
            tool = %definition.name,
            attributes = ?context.span_attributes(),
            "Dispatching tool"
        );
        tool.execute(params, context).await
    }

    /// Claim an idempotency key, or decline when it is already in flight
    fn try_begin(&self, key: String) -> Option<InFlightGuard<'_>> {
        let mut keys = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if keys.contains(&key) {
            return None;
        }
        keys.insert(key.clone());
        Some(InFlightGuard {
            keys: &self.in_flight,
            key,
        })
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .field("categories", &self.categories())
            .finish_non_exhaustive()
    }
}

/// Releases an idempotency key when the invocation finishes, however it
/// finishes.
struct InFlightGuard<'a> {
    keys: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Check `params` against a tool's declared schema.
///
/// `null` counts as an empty parameter object so tools without required
/// parameters can be called bare.
fn parameter_violations(definition: &ToolDefinition, params: &Value) -> Vec<ParameterViolation> {
    let empty = serde_json::Map::new();
    let supplied = match params {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => {
            return vec![ParameterViolation {
                parameter: "params".to_owned(),
                reason: "parameters must be a JSON object".to_owned(),
            }];
        }
    };

    let mut violations = Vec::new();

    for (name, spec) in &definition.parameter_schema {
        match supplied.get(name) {
            Some(value) => {
                if !spec.param_type.matches(value) {
                    violations.push(ParameterViolation {
                        parameter: name.clone(),
                        reason: format!("must be a {}", spec.param_type.as_str()),
                    });
                }
            }
            None => {
                if spec.required {
                    violations.push(ParameterViolation {
                        parameter: name.clone(),
                        reason: "is required but missing".to_owned(),
                    });
                }
            }
        }
    }

    for name in supplied.keys() {
        if !definition.parameter_schema.contains_key(name) {
            violations.push(ParameterViolation {
                parameter: name.clone(),
                reason: "is not a declared parameter".to_owned(),
            });
        }
    }

    violations
}

fn validation_failure(tool_name: &str, violations: &[ParameterViolation]) -> ToolExecutionResult {
    ToolExecutionResult::rejected(tool_name, json!({ "violations": violations }))
        .with_message("Parameter validation failed")
}
