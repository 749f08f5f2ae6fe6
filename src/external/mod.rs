// ABOUTME: External service clients (embedding provider, vector index)
// ABOUTME: Provides the retrieval dependencies injected into the search tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! External Service Clients
//!
//! HTTP clients for the services the assistant core depends on. Each client
//! is constructed once from configuration, wrapped in an `Arc`, and injected
//! where needed; the provider traits keep tools testable without a network.

/// Embedding provider client and trait
pub mod embedding;
/// Retry policy shared by the external clients
pub mod retry;
/// Vector index client and trait
pub mod vector_index;

// Re-export commonly used types
pub use embedding::{EmbeddingClient, EmbeddingProvider};
pub use retry::{is_retryable_status, AttemptFailure, RetryPolicy};
pub use vector_index::{SearchMatch, UpsertRecord, VectorIndexClient, VectorIndexProvider};
