// ABOUTME: In-memory embedding and vector index stubs for tool integration tests
// ABOUTME: Record every call and answer with configured matches or failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

// Each test binary compiles this module; not every binary uses every stub.
#![allow(dead_code)]

use async_trait::async_trait;
use scribe_core::errors::{AppError, AppResult, ErrorCode};
use scribe_core::external::{EmbeddingProvider, SearchMatch, UpsertRecord, VectorIndexProvider};
use serde_json::Value;
use std::sync::Mutex;

/// Embedding provider that answers with a fixed vector or a fixed failure
pub struct StubEmbedding {
    vector: Vec<f32>,
    fail_with: Option<ErrorCode>,
    /// Every input passed to `embed`, in call order
    pub inputs: Mutex<Vec<String>>,
}

impl StubEmbedding {
    /// Stub that embeds every input into `vector`
    pub fn returning(vector: Vec<f32>) -> Self {
        Self {
            vector,
            fail_with: None,
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Stub whose `embed` always fails with `code`
    pub fn failing(code: ErrorCode) -> Self {
        Self {
            vector: Vec::new(),
            fail_with: Some(code),
            inputs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedding {
    async fn embed(&self, input: &str) -> AppResult<Vec<f32>> {
        self.inputs.lock().unwrap().push(input.to_owned());
        match self.fail_with {
            Some(code) => Err(AppError::new(code, "stub embedding failure")),
            None => Ok(self.vector.clone()),
        }
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// Arguments of one recorded `query` call
pub struct RecordedQuery {
    pub top_k: usize,
    pub filter: Option<Value>,
}

/// Vector index that answers with fixed matches or a fixed failure
pub struct StubVectorIndex {
    matches: Vec<SearchMatch>,
    fail_with: Option<ErrorCode>,
    /// Every `query` call, in call order
    pub queries: Mutex<Vec<RecordedQuery>>,
    /// Every `upsert` batch, in call order
    pub upserts: Mutex<Vec<Vec<UpsertRecord>>>,
}

impl StubVectorIndex {
    /// Stub that answers every query with `matches`
    pub fn returning(matches: Vec<SearchMatch>) -> Self {
        Self {
            matches,
            fail_with: None,
            queries: Mutex::new(Vec::new()),
            upserts: Mutex::new(Vec::new()),
        }
    }

    /// Stub whose `query` and `upsert` always fail with `code`
    pub fn failing(code: ErrorCode) -> Self {
        Self {
            matches: Vec::new(),
            fail_with: Some(code),
            queries: Mutex::new(Vec::new()),
            upserts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VectorIndexProvider for StubVectorIndex {
    async fn query(
        &self,
        _vector: &[f32],
        top_k: usize,
        filter: Option<&Value>,
    ) -> AppResult<Vec<SearchMatch>> {
        self.queries.lock().unwrap().push(RecordedQuery {
            top_k,
            filter: filter.cloned(),
        });
        match self.fail_with {
            Some(code) => Err(AppError::new(code, "stub index failure")),
            None => Ok(self.matches.clone()),
        }
    }

    async fn upsert(&self, records: &[UpsertRecord]) -> AppResult<usize> {
        if let Some(code) = self.fail_with {
            return Err(AppError::new(code, "stub index failure"));
        }
        self.upserts.lock().unwrap().push(records.to_vec());
        Ok(records.len())
    }
}

/// Build a scored match with object `metadata`, lifting `content` the way
/// the real client does
pub fn search_match(id: &str, score: f64, metadata: Value) -> SearchMatch {
    let mut metadata = match metadata {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    let content = match metadata.remove("content") {
        Some(Value::String(text)) => text,
        _ => String::new(),
    };
    SearchMatch {
        id: id.to_owned(),
        score,
        content,
        metadata,
    }
}
