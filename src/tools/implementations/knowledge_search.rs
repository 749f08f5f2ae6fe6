// ABOUTME: Semantic retrieval tool that embeds a query and searches the vector index.
// ABOUTME: Degrades to an empty result set instead of failing when providers are down.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Knowledge Search Tool
//!
//! Embeds the caller's query, searches the vector index, and returns the
//! matches that clear the similarity cutoff together with a retrieval
//! confidence score.
//!
//! Provider outages never surface as tool failures. When the embedding
//! service or the index is unreachable the tool reports success with an
//! empty result set, `degraded: true`, and confidence 0 so the assistant
//! can tell the user the knowledge base was unavailable instead of
//! crashing the whole exchange.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::external::{EmbeddingProvider, SearchMatch, UpsertRecord, VectorIndexProvider};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::{EvidencePoint, ToolExecutionResult};
use crate::tools::traits::{AssistantTool, ParameterSpec, ParameterType, ToolDefinition};

const TOOL_NAME: &str = "search_knowledge";
const CATEGORY: &str = "knowledge";
const SOURCE_TYPE: &str = "vector_search";

/// Matches returned per query when the caller does not ask for a count
const DEFAULT_TOP_K: usize = 10;
/// Cosine similarity below this is noise, not recall
const DEFAULT_MIN_SIMILARITY: f64 = 0.7;

const CONFIDENCE_BASE: f64 = 0.5;
const CONFIDENCE_SCALE: f64 = 0.4;
const CONFIDENCE_CAP: f64 = 0.9;

/// Semantic search over previously indexed meeting knowledge
pub struct KnowledgeSearchTool {
    embedding: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
}

impl KnowledgeSearchTool {
    /// Create the tool from its two providers
    #[must_use]
    pub fn new(embedding: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndexProvider>) -> Self {
        Self { embedding, index }
    }

    /// Embed `content` and upsert it into the index under `id`.
    ///
    /// Indexing is a write path, so unlike search it propagates provider
    /// failures to the caller instead of degrading.
    ///
    /// # Errors
    ///
    /// Returns the embedding or index error unchanged.
    pub async fn upsert_content(
        &self,
        id: impl Into<String>,
        content: &str,
        mut metadata: Map<String, Value>,
    ) -> AppResult<usize> {
        let clipped = crate::external::embedding::clip_to_max_chars(content);
        let values = self.embedding.embed(clipped).await?;
        metadata.insert("content".to_owned(), Value::String(clipped.to_owned()));

        let record = UpsertRecord {
            id: id.into(),
            values,
            metadata,
        };
        self.index.upsert(&[record]).await
    }

    async fn search(
        &self,
        params: &SearchParams,
        context: &ToolExecutionContext,
    ) -> AppResult<Vec<SearchMatch>> {
        let vector = self.embedding.embed(&params.query).await?;
        context.ensure_active()?;
        self.index
            .query(&vector, params.top_k, params.filter.as_ref())
            .await
    }
}

#[async_trait::async_trait]
impl AssistantTool for KnowledgeSearchTool {
    fn describe(&self) -> ToolDefinition {
        ToolDefinition::new(
            TOOL_NAME,
            "Search the meeting knowledge base for content semantically similar to a query",
            CATEGORY,
        )
        .with_parameter(
            "query",
            ParameterSpec::required(ParameterType::String, "Natural-language search query"),
        )
        .with_parameter(
            "topK",
            ParameterSpec::optional(
                ParameterType::Number,
                "Maximum number of matches to return (default 10)",
            ),
        )
        .with_parameter(
            "minSimilarity",
            ParameterSpec::optional(
                ParameterType::Number,
                "Similarity cutoff between 0 and 1 (default 0.7)",
            ),
        )
        .with_parameter(
            "filter",
            ParameterSpec::optional(
                ParameterType::Object,
                "Metadata filter applied by the index before scoring",
            ),
        )
    }

    async fn execute(
        &self,
        params: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolExecutionResult> {
        context.ensure_active()?;

        let params = match SearchParams::from_value(&params) {
            Ok(parsed) => parsed,
            Err(reason) => {
                let query = params.get("query").and_then(Value::as_str).unwrap_or("");
                return Ok(ToolExecutionResult::rejected(
                    SOURCE_TYPE,
                    json!({ "results": [], "count": 0, "query": query }),
                )
                .with_message(reason));
            }
        };

        let matches = match self.search(&params, context).await {
            Ok(matches) => matches,
            Err(error) if is_provider_outage(&error) => {
                warn!(
                    tool = TOOL_NAME,
                    error = %error,
                    "Knowledge search degraded, provider unavailable"
                );
                return Ok(ToolExecutionResult::degraded(
                    SOURCE_TYPE,
                    json!({ "results": [], "count": 0, "query": params.query }),
                    format!("Knowledge base unavailable: {}", error.message),
                ));
            }
            Err(error) => return Err(error),
        };

        let surviving: Vec<&SearchMatch> = matches
            .iter()
            .filter(|m| m.score >= params.min_similarity)
            .collect();
        debug!(
            tool = TOOL_NAME,
            returned = matches.len(),
            surviving = surviving.len(),
            cutoff = params.min_similarity,
            "Applied similarity cutoff"
        );

        let confidence = retrieval_confidence(&surviving);
        let data_points = surviving.iter().map(|m| evidence_point(m)).collect();
        let results: Vec<Value> = surviving.iter().map(|m| result_entry(m)).collect();

        Ok(ToolExecutionResult::ok(
            SOURCE_TYPE,
            json!({
                "results": results,
                "count": results.len(),
                "query": params.query,
            }),
        )
        .with_confidence(confidence)
        .with_data_points(data_points))
    }
}

struct SearchParams {
    query: String,
    top_k: usize,
    min_similarity: f64,
    filter: Option<Value>,
}

impl SearchParams {
    /// Range and emptiness checks on top of the registry's type checks
    fn from_value(params: &Value) -> Result<Self, String> {
        let query = params
            .get("query")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        if query.is_empty() {
            return Err("query must not be empty".to_owned());
        }

        let top_k = match params.get("topK") {
            Some(value) => match value.as_u64() {
                Some(k) if k >= 1 => usize::try_from(k).unwrap_or(usize::MAX),
                _ => return Err("topK must be a positive integer".to_owned()),
            },
            None => DEFAULT_TOP_K,
        };

        let min_similarity = match params.get("minSimilarity") {
            Some(value) => match value.as_f64() {
                Some(s) if (0.0..=1.0).contains(&s) => s,
                _ => return Err("minSimilarity must be between 0 and 1".to_owned()),
            },
            None => DEFAULT_MIN_SIMILARITY,
        };

        Ok(Self {
            query: query.to_owned(),
            top_k,
            min_similarity,
            filter: params.get("filter").cloned(),
        })
    }
}

/// Dependency outages degrade the result; everything else propagates
fn is_provider_outage(error: &AppError) -> bool {
    matches!(
        error.code,
        ErrorCode::ExternalServiceError
            | ErrorCode::ExternalServiceUnavailable
            | ErrorCode::ExternalServiceTimeout
    )
}

/// Confidence for a surviving result set.
///
/// Empty retrieval means no confidence at all. Otherwise confidence grows
/// with the average similarity but is capped below certainty, because
/// vector recall is always an approximation.
fn retrieval_confidence(surviving: &[&SearchMatch]) -> f64 {
    if surviving.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let average = surviving.iter().map(|m| m.score).sum::<f64>() / surviving.len() as f64;
    (CONFIDENCE_BASE + average * CONFIDENCE_SCALE).min(CONFIDENCE_CAP)
}

fn metadata_str<'a>(metadata: &'a Map<String, Value>, key: &str, fallback: &'a str) -> &'a str {
    metadata.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

fn result_entry(m: &SearchMatch) -> Value {
    json!({
        "id": m.id,
        "score": m.score,
        "content": m.content,
        "sourceType": metadata_str(&m.metadata, "sourceType", "unknown"),
        "sourceId": metadata_str(&m.metadata, "sourceId", ""),
        "title": metadata_str(&m.metadata, "title", "Untitled"),
        "summary": metadata_str(&m.metadata, "summary", ""),
        "createdAt": metadata_str(&m.metadata, "createdAt", ""),
    })
}

fn evidence_point(m: &SearchMatch) -> EvidencePoint {
    EvidencePoint::new(
        metadata_str(&m.metadata, "title", "Untitled"),
        metadata_str(&m.metadata, "sourceType", "unknown"),
        m.score,
    )
}
