// ABOUTME: Typed events flowing through an analysis stream, with SSE frame encoding.
// ABOUTME: A stream is zero or more chunks followed by exactly one terminal event.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One event in an analysis stream.
///
/// `Chunk` carries incremental progress. `Complete` and `Error` are
/// terminal; a well-formed stream contains exactly one of them, last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Incremental progress payload
    Chunk {
        /// Partial result for the consumer to render immediately
        data: Value,
    },
    /// Successful terminal event carrying the final payload
    Complete {
        /// Final result of the stream
        data: Value,
    },
    /// Failed terminal event
    Error {
        /// Human-readable description of what went wrong
        error: String,
    },
}

impl StreamEvent {
    /// Incremental progress event
    #[must_use]
    pub fn chunk(data: Value) -> Self {
        Self::Chunk { data }
    }

    /// Successful terminal event
    #[must_use]
    pub fn complete(data: Value) -> Self {
        Self::Complete { data }
    }

    /// Failed terminal event
    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    /// Whether this event ends the stream
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }

    /// Encode the event as its wire JSON.
    ///
    /// Serialization of these variants cannot fail for JSON payloads, but
    /// the fallback keeps the wire well-formed rather than panicking
    /// mid-stream.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"error","error":"event serialization failed"}"#.to_owned()
        })
    }

    /// Encode as one SSE frame: `data: <json>\n\n`.
    #[must_use]
    pub fn to_frame(&self) -> String {
        format!("data: {}\n\n", self.to_json())
    }
}
