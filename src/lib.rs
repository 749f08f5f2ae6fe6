// ABOUTME: Main library entry point for the Scribe meeting intelligence core
// ABOUTME: Provides tool execution, structured-output analysis, and streaming delivery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

// Crate-level attributes:
// - recursion_limit: Increased from default 128 to 256 for complex derive macros
//   (serde, thiserror) on deeply nested types like the document schemas
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Scribe Core
//!
//! The tool-execution and structured-output core of the Scribe meeting
//! assistant. The conversational layer above it produces free-form model
//! output and tool calls; this crate turns both into contracts the rest of
//! the product can trust.
//!
//! ## Features
//!
//! - **Tool registry**: declared parameter schemas, approval gating, and
//!   idempotent dispatch for every assistant capability
//! - **Knowledge search**: semantic retrieval over the meeting knowledge
//!   base that degrades instead of failing when the index is unreachable
//! - **Analysis pipeline**: recursive validation and total sanitization of
//!   model-produced meeting documents
//! - **Streaming delivery**: ordered chunk/terminal event relay encoded as
//!   Server-Sent Events
//!
//! ## Quick Start
//!
//! 1. Export the embedding and vector index service environment variables
//! 2. Start the HTTP server with `scribe-server`
//! 3. Stream analyses through `POST /api/analysis/stream`
//!
//! ## Architecture
//!
//! - **Tools**: the shared tool contract, registry, and implementations
//! - **Analysis**: document schemas, the validator, and the sanitizer
//! - **Streaming**: stream events, the producer relay, and frame parsing
//! - **External**: embedding and vector index clients behind provider traits
//! - **Routes/Server**: the axum delivery layer over the library core
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use scribe_core::config::environment::ServerConfig;
//! use scribe_core::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("Scribe server configured with port: HTTP={}", config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Structured-output validation and sanitization for analysis documents
pub mod analysis;

/// Configuration management for the server and external service clients
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// External service clients (embedding provider, vector index)
pub mod external;

/// Structured logging initialization and configuration
pub mod logging;

/// `HTTP` route handlers for analysis streaming and tool execution
pub mod routes;

/// `HTTP` server assembly and shared resource container
pub mod server;

/// Stream events, the producer relay, and SSE frame parsing
pub mod streaming;

/// Tool contract, registry, and implementations
pub mod tools;
