// ABOUTME: Structured-output analysis module with declarative schemas, validation, and repair
// ABOUTME: Turns possibly-malformed model output into guaranteed-valid domain documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Structured-output validation and sanitization
//!
//! Model output is untrusted: fields go missing, enums drift, counts lie.
//! This module provides:
//!
//! - **Schema**: a recursive, declarative field schema (type, required,
//!   enum, numeric bounds, nested item/object schemas, designated defaults)
//! - **Validator**: reports every structural defect in one pass without
//!   mutating the document
//! - **Sanitizer**: repairs any input into a document guaranteed to pass the
//!   validator, substituting defaults and recomputing derived fields
//! - **Meeting**: the meeting-analysis document schema used by the Scribe
//!   assistant, with its quality heuristics and derived-count recomputation

/// Meeting-analysis document schema and helpers
pub mod meeting;
/// Total repair of malformed documents
pub mod sanitizer;
/// Recursive field schema and validation report types
pub mod schema;
/// Recursive structural validation
pub mod validator;

pub use meeting::{
    derive_session_title, meeting_analysis_schema, sanitize_meeting_analysis,
    validate_meeting_analysis,
};
pub use sanitizer::sanitize;
pub use schema::{DocumentSchema, FieldSchema, FieldType, ValidationResult};
pub use validator::validate;
