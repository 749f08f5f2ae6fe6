// ABOUTME: Defines ToolExecutionResult, the tagged outcome every tool dispatch produces.
// ABOUTME: Encodes the degrade-don't-break taxonomy: success, degraded-with-warning, or caller error.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Tool Result Types
//!
//! Every tool dispatch resolves to a [`ToolExecutionResult`]. The flags
//! encode a deliberate taxonomy:
//!
//! - `success: true, degraded: false` — the tool did its job (possibly
//!   finding nothing)
//! - `success: true, degraded: true` — a dependency failed and the tool
//!   absorbed it; `warning` says what went wrong and `data` is empty
//! - `success: false` — the *caller's* request was malformed; nothing ran
//!
//! Hard `Err` is reserved for configuration defects and cancellation, which
//! must never be masked as degraded results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One human-readable evidence summary backing a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePoint {
    /// Short label of the evidence (e.g. a document title)
    pub title: String,
    /// Where the evidence came from
    pub source: String,
    /// Relevance score in `[0, 1]`
    pub relevance: f64,
}

impl EvidencePoint {
    /// Create an evidence point
    #[must_use]
    pub fn new(title: impl Into<String>, source: impl Into<String>, relevance: f64) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            relevance,
        }
    }
}

/// Tagged outcome of one tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolExecutionResult {
    /// False only when the caller's request was malformed
    pub success: bool,
    /// Tool-specific payload
    pub data: Value,
    /// Aggregate confidence in `[0, 1]`; meaningful only when `success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Tag identifying the producing tool (e.g. `vector_search`)
    pub source_type: String,
    /// Ordered human-readable evidence summaries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_points: Vec<EvidencePoint>,
    /// Set when a dependency failure was absorbed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Free-form note for the caller (e.g. why a request was rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// True when the result was produced without a required dependency
    #[serde(default)]
    pub degraded: bool,
}

impl ToolExecutionResult {
    /// Successful result
    #[must_use]
    pub fn ok(source_type: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            data,
            confidence: None,
            source_type: source_type.into(),
            data_points: Vec::new(),
            warning: None,
            message: None,
            degraded: false,
        }
    }

    /// Caller error: the request was malformed and nothing ran
    #[must_use]
    pub fn rejected(source_type: impl Into<String>, data: Value) -> Self {
        Self {
            success: false,
            data,
            confidence: None,
            source_type: source_type.into(),
            data_points: Vec::new(),
            warning: None,
            message: None,
            degraded: false,
        }
    }

    /// Successful-but-degraded result after an absorbed dependency failure
    #[must_use]
    pub fn degraded(
        source_type: impl Into<String>,
        data: Value,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            data,
            confidence: Some(0.0),
            source_type: source_type.into(),
            data_points: Vec::new(),
            warning: Some(warning.into()),
            message: None,
            degraded: true,
        }
    }

    /// Attach an aggregate confidence
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attach evidence summaries
    #[must_use]
    pub fn with_data_points(mut self, data_points: Vec<EvidencePoint>) -> Self {
        self.data_points = data_points;
        self
    }

    /// Attach a warning
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Attach a caller-facing note
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
