// ABOUTME: Server binary wiring configuration, logging, tools, and the HTTP listener
// ABOUTME: Builds the external service clients and serves the analysis and tool endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

#![recursion_limit = "256"]

//! # Scribe Server Binary
//!
//! Starts the analysis and tool-execution HTTP server: loads configuration
//! from the environment, initializes logging, constructs the external
//! service clients, registers the tools, and serves until ctrl-c.

use anyhow::Result;
use clap::Parser;
use scribe_core::{
    config::environment::ServerConfig,
    external::{EmbeddingClient, VectorIndexClient},
    logging,
    server::{HttpServer, ServerResources},
    tools::{KnowledgeSearchTool, ToolRegistry},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "scribe-server")]
#[command(about = "Scribe meeting intelligence - tool execution and analysis server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using environment configuration only");
            Args {
                http_port: None,
                host: None,
            }
        }
    };

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;

    info!("Starting Scribe analysis server");
    info!("{}", config.summary());

    let embedding = Arc::new(EmbeddingClient::new(config.embedding.clone())?);
    let vector_index = Arc::new(VectorIndexClient::new(config.vector_index.clone())?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(KnowledgeSearchTool::new(embedding, vector_index)))?;
    info!("Registered {} tools", registry.len());

    let resources = Arc::new(ServerResources::new(registry, config));
    HttpServer::new(resources).serve().await?;

    info!("Server stopped");
    Ok(())
}
