// ABOUTME: Embedding provider client converting text into fixed-width vectors
// ABOUTME: Enforces the configured vector width; a width mismatch is a configuration error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Embedding Provider Client
//!
//! Thin HTTP client for the embedding service. One call, one vector:
//! `POST {base}/embeddings` with the configured model and dimension count,
//! answered by `{"embedding": [..]}`.
//!
//! The returned vector width must equal the configured width. The vector
//! index was built at that width, so a mismatch means the deployment is
//! misconfigured; it surfaces as a fatal configuration error rather than a
//! degraded search result.

use crate::config::environment::EmbeddingConfig;
use crate::errors::{AppError, AppResult};
use crate::external::retry::{AttemptFailure, RetryPolicy};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Service name used in error messages and logs
const SERVICE: &str = "embedding service";

/// Longest input submitted for embedding; longer text is clipped
pub const MAX_INPUT_CHARS: usize = 8000;

/// Converts text into an embedding vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `input` into a vector of the provider's configured width
    async fn embed(&self, input: &str) -> AppResult<Vec<f32>>;

    /// Vector width every embedding from this provider has
    fn dimensions(&self) -> usize;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    dimensions: usize,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// HTTP client for the embedding service
pub struct EmbeddingClient {
    config: EmbeddingConfig,
    http_client: reqwest::Client,
    retry: RetryPolicy,
}

impl EmbeddingClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client cannot be built.
    pub fn new(config: EmbeddingConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::config_invalid(format!("Failed to build embedding HTTP client: {e}"))
            })?;
        let retry = RetryPolicy::with_max_retries(config.max_retries);

        Ok(Self {
            config,
            http_client,
            retry,
        })
    }

    async fn request_embedding(&self, input: &str) -> Result<Vec<f32>, AttemptFailure> {
        let url = format!("{}/embeddings", self.config.base_url);
        let body = EmbeddingRequest {
            model: &self.config.model,
            dimensions: self.config.dimensions,
            input,
        };

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AttemptFailure::from_request_error(SERVICE, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptFailure::from_status(SERVICE, status.as_u16(), &body));
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            AttemptFailure::Fatal(AppError::external_service(
                SERVICE,
                format!("JSON parse error: {e}"),
            ))
        })?;

        if parsed.embedding.len() != self.config.dimensions {
            return Err(AttemptFailure::Fatal(AppError::config_invalid(format!(
                "{SERVICE} returned a {}-dimensional vector, the index expects {}",
                parsed.embedding.len(),
                self.config.dimensions
            ))));
        }

        Ok(parsed.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, input: &str) -> AppResult<Vec<f32>> {
        if input.trim().is_empty() {
            return Err(AppError::invalid_input("Embedding input cannot be empty"));
        }

        let input = clip_to_max_chars(input);
        debug!(chars = input.chars().count(), "Requesting embedding");

        let mut attempt = 0;
        loop {
            match self.request_embedding(input).await {
                Ok(vector) => return Ok(vector),
                Err(failure) if failure.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.retry.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Embedding request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => return Err(failure.into_error()),
            }
        }
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }
}

/// Clip `input` to [`MAX_INPUT_CHARS`] characters on a char boundary
#[must_use]
pub fn clip_to_max_chars(input: &str) -> &str {
    match input.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_index, _)) => &input[..byte_index],
        None => input,
    }
}
