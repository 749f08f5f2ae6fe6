// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment-driven configs for the server and its external service clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Configuration module for the Scribe assistant core
//!
//! All configuration is environment-only. The server and every external
//! service client load their settings once at startup via
//! [`environment::ServerConfig::from_env`] and pass them down explicitly.

/// Environment and server configuration
pub mod environment;

pub use environment::{EmbeddingConfig, ServerConfig, VectorIndexConfig};
