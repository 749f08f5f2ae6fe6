// ABOUTME: HTTP server assembly wiring shared resources into the axum router
// ABOUTME: Owns the resource container, route composition, and graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Server Assembly
//!
//! [`ServerResources`] is the dependency-injection container handed to
//! every route: the tool registry and the resolved configuration, built
//! once at startup and shared via `Arc`. [`HttpServer`] composes the
//! domain routers on top of it and runs the listener until ctrl-c.

use crate::{
    config::environment::ServerConfig,
    errors::{AppError, AppResult},
    routes::{AnalysisRoutes, HealthRoutes, ToolRoutes},
    tools::ToolRegistry,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared resource container for dependency injection into routes
pub struct ServerResources {
    /// Registry of every tool this instance can dispatch
    pub registry: ToolRegistry,
    /// Resolved server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the registry and configuration built at startup
    #[must_use]
    pub const fn new(registry: ToolRegistry, config: ServerConfig) -> Self {
        Self { registry, config }
    }
}

/// HTTP server over the analysis and tool routes
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Compose the full application router.
    ///
    /// Exposed separately from [`serve`](Self::serve) so tests can drive
    /// the router directly without binding a port.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(ToolRoutes::routes(self.resources.clone()))
            .merge(AnalysisRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot bind or the accept loop
    /// fails.
    pub async fn serve(&self) -> AppResult<()> {
        let address = format!(
            "{}:{}",
            self.resources.config.host, self.resources.config.http_port
        );
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|error| AppError::internal(format!("Failed to bind {address}: {error}")))?;

        info!("HTTP server listening on {address}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|error| AppError::internal(format!("HTTP server failed: {error}")))
    }
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(error = %error, "Failed to listen for shutdown signal");
        return;
    }
    info!("Received shutdown signal, draining connections");
}
