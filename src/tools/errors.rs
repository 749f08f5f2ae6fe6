// ABOUTME: Defines tool-specific error types for the pluggable tools architecture.
// ABOUTME: Provides structured errors that integrate with the main AppError system.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Tool Error Types
//!
//! Structured errors for tool registry and dispatch operations, with
//! conversions into [`AppError`] for HTTP response formatting. Note the
//! classification: a missing tool is a *configuration* defect (the
//! deployment wired up a name nothing implements), not a 404.

use std::error::Error;
use std::fmt;

use crate::errors::{AppError, ErrorCode};

/// Errors specific to tool operations
#[derive(Debug, Clone)]
pub enum ToolError {
    /// Tool was not found in the registry
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Tool requires human approval before it may run
    ApprovalRequired {
        /// Name of the gated tool
        tool_name: String,
    },
    /// Tool is already registered (for registry operations)
    AlreadyRegistered {
        /// Name of the already-registered tool
        tool_name: String,
    },
    /// Tool parameter validation failed
    InvalidParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Reason the parameter is invalid
        reason: String,
    },
    /// Required parameter is missing
    MissingParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the missing parameter
        parameter: String,
    },
    /// Caller supplied a parameter the tool does not declare
    UnknownParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the undeclared parameter
        parameter: String,
    },
    /// An identical invocation is already in flight
    DuplicateInvocation {
        /// Name of the tool
        tool_name: String,
        /// Idempotency key both invocations share
        idempotency_key: String,
    },
    /// Tool execution failed
    ExecutionFailed {
        /// Name of the tool that failed
        tool_name: String,
        /// Details about the failure
        details: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "approval required" error
    #[must_use]
    pub fn approval_required(tool_name: impl Into<String>) -> Self {
        Self::ApprovalRequired {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "already registered" error
    #[must_use]
    pub fn already_registered(tool_name: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(
        tool_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an "unknown parameter" error
    #[must_use]
    pub fn unknown_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::UnknownParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a "duplicate invocation" error
    #[must_use]
    pub fn duplicate_invocation(
        tool_name: impl Into<String>,
        idempotency_key: impl Into<String>,
    ) -> Self {
        Self::DuplicateInvocation {
            tool_name: tool_name.into(),
            idempotency_key: idempotency_key.into(),
        }
    }

    /// Create an "execution failed" error
    #[must_use]
    pub fn execution_failed(tool_name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool_name: tool_name.into(),
            details: details.into(),
        }
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name }
            | Self::ApprovalRequired { tool_name }
            | Self::AlreadyRegistered { tool_name }
            | Self::InvalidParameter { tool_name, .. }
            | Self::MissingParameter { tool_name, .. }
            | Self::UnknownParameter { tool_name, .. }
            | Self::DuplicateInvocation { tool_name, .. }
            | Self::ExecutionFailed { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { tool_name } => {
                write!(f, "No tool is registered under '{tool_name}'")
            }
            Self::ApprovalRequired { tool_name } => {
                write!(f, "Tool '{tool_name}' requires human approval before it can run")
            }
            Self::AlreadyRegistered { tool_name } => {
                write!(f, "Tool '{tool_name}' is already registered")
            }
            Self::InvalidParameter {
                tool_name,
                parameter,
                reason,
            } => {
                write!(
                    f,
                    "Invalid parameter '{parameter}' for tool '{tool_name}': {reason}"
                )
            }
            Self::MissingParameter {
                tool_name,
                parameter,
            } => {
                write!(
                    f,
                    "Missing required parameter '{parameter}' for tool '{tool_name}'"
                )
            }
            Self::UnknownParameter {
                tool_name,
                parameter,
            } => {
                write!(
                    f,
                    "Parameter '{parameter}' is not declared by tool '{tool_name}'"
                )
            }
            Self::DuplicateInvocation {
                tool_name,
                idempotency_key,
            } => {
                write!(
                    f,
                    "Tool '{tool_name}' is already running an identical invocation ({idempotency_key})"
                )
            }
            Self::ExecutionFailed { tool_name, details } => {
                write!(f, "Tool '{tool_name}' execution failed: {details}")
            }
        }
    }
}

impl Error for ToolError {}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        let message = error.to_string();
        match error {
            ToolError::NotFound { .. } => Self::new(ErrorCode::ToolNotFound, message),
            ToolError::ApprovalRequired { .. } => Self::new(ErrorCode::ApprovalRequired, message),
            ToolError::AlreadyRegistered { .. } => Self::new(ErrorCode::ConfigInvalid, message),
            ToolError::InvalidParameter { .. }
            | ToolError::UnknownParameter { .. }
            | ToolError::DuplicateInvocation { .. } => {
                Self::new(ErrorCode::InvalidInput, message)
            }
            ToolError::MissingParameter { .. } => {
                Self::new(ErrorCode::MissingRequiredField, message)
            }
            ToolError::ExecutionFailed { .. } => Self::new(ErrorCode::InternalError, message),
        }
    }
}
