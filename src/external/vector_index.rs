// ABOUTME: Vector index client for similarity queries and content upserts
// ABOUTME: Speaks the camelCase JSON wire protocol of the hosted index service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Vector Index Client
//!
//! Client for the hosted vector index. Two operations:
//!
//! - `POST {base}/query` with `{vector, topK, includeMetadata, filter?}`,
//!   answered by `{"matches": [{id, score, metadata}]}` ranked by descending
//!   similarity
//! - `POST {base}/vectors/upsert` with `{vectors: [{id, values, metadata}]}`,
//!   answered by `{"upsertedCount": n}`
//!
//! The index stores record text under `metadata["content"]`; the client
//! lifts it into [`SearchMatch::content`] so callers get the text and the
//! remaining metadata separately.
//!
//! Scores are cosine similarities in `[0, 1]`. The client performs no
//! filtering of its own; similarity cutoffs belong to the search tool.

use crate::config::environment::VectorIndexConfig;
use crate::errors::{AppError, AppResult};
use crate::external::retry::{AttemptFailure, RetryPolicy};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Service name used in error messages and logs
const SERVICE: &str = "vector index";

/// One scored match returned by a similarity query
#[derive(Debug, Clone)]
pub struct SearchMatch {
    /// Stable identifier of the indexed record
    pub id: String,
    /// Cosine similarity against the query vector, in `[0, 1]`
    pub score: f64,
    /// Indexed text, truncated to the index metadata limit at upsert time
    pub content: String,
    /// Metadata stored alongside the vector, minus the lifted `content`
    pub metadata: Map<String, Value>,
}

/// One record submitted for indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRecord {
    /// Stable identifier; upserting an existing id replaces the record
    pub id: String,
    /// Embedding vector; must match the index width
    pub values: Vec<f32>,
    /// Metadata returned verbatim with future matches
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    id: String,
    score: f64,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl From<WireMatch> for SearchMatch {
    fn from(mut wire: WireMatch) -> Self {
        let content = match wire.metadata.remove("content") {
            Some(Value::String(text)) => text,
            _ => String::new(),
        };
        Self {
            id: wire.id,
            score: wire.score,
            content,
            metadata: wire.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [UpsertRecord],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    upserted_count: usize,
}

/// Queries and updates the vector index
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Return up to `top_k` matches ranked by descending similarity.
    ///
    /// `filter` is an opaque metadata predicate forwarded verbatim to the
    /// index service.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&Value>,
    ) -> AppResult<Vec<SearchMatch>>;

    /// Insert or replace records, returning how many the index accepted
    async fn upsert(&self, records: &[UpsertRecord]) -> AppResult<usize>;
}

/// HTTP client for the vector index service
pub struct VectorIndexClient {
    config: VectorIndexConfig,
    http_client: reqwest::Client,
    retry: RetryPolicy,
}

impl VectorIndexClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client cannot be built.
    pub fn new(config: VectorIndexConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::config_invalid(format!("Failed to build vector index HTTP client: {e}"))
            })?;
        let retry = RetryPolicy::with_max_retries(config.max_retries);

        Ok(Self {
            config,
            http_client,
            retry,
        })
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, AttemptFailure>
    where
        Req: Serialize + Sync,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.config.base_url);

        let mut request = self.http_client.post(&url).json(body);
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

        response.json().await.map_err(|e| {
            AttemptFailure::Fatal(AppError::external_service(
                SERVICE,
                format!("JSON parse error: {e}"),
            ))
        })
    }

    async fn post_with_retry<Req, Resp>(&self, path: &str, body: &Req) -> AppResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: for<'de> Deserialize<'de>,
    {
        let mut attempt = 0;
        loop {
            match self.post_json(path, body).await {
                Ok(parsed) => return Ok(parsed),
                Err(failure) if failure.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.retry.max_retries,
                        path,
                        "Vector index request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => return Err(failure.into_error()),
            }
        }
    }
}

#[async_trait]
impl VectorIndexProvider for VectorIndexClient {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&Value>,
    ) -> AppResult<Vec<SearchMatch>> {
        if vector.is_empty() {
            return Err(AppError::invalid_input("Query vector cannot be empty"));
        }
        if top_k == 0 {
            return Err(AppError::invalid_input("topK must be at least 1"));
        }

        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            filter,
        };
        let response: QueryResponse = self.post_with_retry("/query", &body).await?;
        let matches: Vec<SearchMatch> =
            response.matches.into_iter().map(SearchMatch::from).collect();

        debug!(matches = matches.len(), top_k, "Vector query served");
        Ok(matches)
    }

    async fn upsert(&self, records: &[UpsertRecord]) -> AppResult<usize> {
        if records.is_empty() {
            debug!("Upsert called with no records, skipping request");
            return Ok(0);
        }

        let body = UpsertRequest { vectors: records };
        let response: UpsertResponse = self.post_with_retry("/vectors/upsert", &body).await?;

        debug!(upserted = response.upserted_count, "Vector upsert served");
        Ok(response.upserted_count)
    }
}
