// ABOUTME: Tool execution module wiring the trait contract, registry, and implementations.
// ABOUTME: Everything a tool call touches between HTTP ingress and provider clients lives here.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Unified tool execution engine for the Scribe assistant
//!
//! This module provides the shared contract every assistant capability
//! implements, plus the registry that validates and dispatches calls.
//! Tools declare their parameter schemas up front so malformed requests
//! are rejected before any tool code runs.

pub mod context;
pub mod errors;
pub mod implementations;
pub mod registry;
pub mod result;
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use implementations::KnowledgeSearchTool;
pub use registry::{ParameterViolation, ToolRegistry};
pub use result::{EvidencePoint, ToolExecutionResult};
pub use traits::{AssistantTool, ParameterSpec, ParameterType, ToolDefinition};
