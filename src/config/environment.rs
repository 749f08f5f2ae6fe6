// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing for all components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! Environment-based configuration
//!
//! Every tunable of the assistant core is read from environment variables
//! exactly once at process start. Client handles built from these configs are
//! constructed by the binary and injected explicitly; nothing reads the
//! environment after startup.

use anyhow::{Context, Result};
use std::env;
use tracing::info;

/// Default embedding model requested from the provider
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default embedding vector width; must match the width the index was built with
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// Default request timeout for external service calls
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the HTTP server
    pub host: String,
    /// HTTP port for the streaming and tool endpoints
    pub http_port: u16,
    /// Embedding provider settings
    pub embedding: EmbeddingConfig,
    /// Vector index settings
    pub vector_index: VectorIndexConfig,
}

/// Embedding provider client configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Base URL of the embedding service
    pub base_url: String,
    /// API key, if the deployment requires one
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    /// Vector width requested from the provider; a response of any other
    /// width is a fatal configuration error
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retry attempts after the first failure (0 = single attempt)
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".into(),
            api_key: None,
            model: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            max_retries: 0,
        }
    }
}

/// Vector index client configuration
#[derive(Debug, Clone)]
pub struct VectorIndexConfig {
    /// Base URL of the vector index service
    pub base_url: String,
    /// API key, if the deployment requires one
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retry attempts after the first failure (0 = single attempt)
    pub max_retries: u32,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".into(),
            api_key: None,
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            max_retries: 0,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", "127.0.0.1")?,
            http_port: env_var_or("HTTP_PORT", "8080")?
                .parse()
                .context("Invalid HTTP_PORT value")?,

            embedding: EmbeddingConfig {
                base_url: env_var_or("EMBEDDING_API_URL", "http://localhost:8081")?,
                api_key: env::var("EMBEDDING_API_KEY").ok(),
                model: env_var_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL)?,
                dimensions: env_var_or(
                    "EMBEDDING_DIMENSIONS",
                    &DEFAULT_EMBEDDING_DIMENSIONS.to_string(),
                )?
                .parse()
                .context("Invalid EMBEDDING_DIMENSIONS value")?,
                timeout_secs: env_var_or(
                    "EMBEDDING_TIMEOUT_SECS",
                    &DEFAULT_CLIENT_TIMEOUT_SECS.to_string(),
                )?
                .parse()
                .context("Invalid EMBEDDING_TIMEOUT_SECS value")?,
                max_retries: env_var_or("EMBEDDING_MAX_RETRIES", "0")?
                    .parse()
                    .context("Invalid EMBEDDING_MAX_RETRIES value")?,
            },

            vector_index: VectorIndexConfig {
                base_url: env_var_or("VECTOR_INDEX_URL", "http://localhost:8082")?,
                api_key: env::var("VECTOR_INDEX_API_KEY").ok(),
                timeout_secs: env_var_or(
                    "VECTOR_INDEX_TIMEOUT_SECS",
                    &DEFAULT_CLIENT_TIMEOUT_SECS.to_string(),
                )?
                .parse()
                .context("Invalid VECTOR_INDEX_TIMEOUT_SECS value")?,
                max_retries: env_var_or("VECTOR_INDEX_MAX_RETRIES", "0")?
                    .parse()
                    .context("Invalid VECTOR_INDEX_MAX_RETRIES value")?,
            },
        };

        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Scribe Core Configuration:\n\
             - Bind: {}:{}\n\
             - Embedding: {} (model {}, {} dims, {} retries)\n\
             - Embedding API Key: {}\n\
             - Vector Index: {} ({} retries)\n\
             - Vector Index API Key: {}",
            self.host,
            self.http_port,
            self.embedding.base_url,
            self.embedding.model,
            self.embedding.dimensions,
            self.embedding.max_retries,
            if self.embedding.api_key.is_some() {
                "Set"
            } else {
                "Not set"
            },
            self.vector_index.base_url,
            self.vector_index.max_retries,
            if self.vector_index.api_key.is_some() {
                "Set"
            } else {
                "Not set"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}
