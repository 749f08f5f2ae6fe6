// ABOUTME: Route module organization for scribe-server HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers over the library core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Route modules for the scribe server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the library core. Handlers own the
//! translation between HTTP shapes and the tool/analysis APIs; no domain
//! logic lives here.

/// Analysis streaming routes (validation report + sanitized document over SSE)
pub mod analysis;
/// Health check and readiness routes
pub mod health;
/// Tool discovery and execution routes
pub mod tools;

/// Analysis streaming route handlers
pub use analysis::AnalysisRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Tool registry route handlers
pub use tools::ToolRoutes;
