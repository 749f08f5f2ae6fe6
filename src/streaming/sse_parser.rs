// ABOUTME: Shared SSE line-buffering parser for analysis stream consumers
// ABOUTME: Handles partial lines across TCP boundaries and multiple events per chunk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # SSE Frame Parser
//!
//! A line-buffering parser for the `data: <json>` frames produced by the
//! streaming analysis endpoint. Solves two correctness issues for
//! consumers:
//!
//! 1. **Multiple events per TCP chunk**: when network buffers batch
//!    several frames into one chunk, all of them are emitted.
//! 2. **Partial JSON across TCP boundaries**: a frame split across two
//!    chunks is buffered until the complete line arrives.
//!
//! Frames that do not decode as [`StreamEvent`] JSON are logged and
//! skipped so one corrupt frame cannot wedge the consumer.

use std::mem;

use tracing::warn;

use super::events::StreamEvent;

/// Line-buffering parser that turns raw SSE bytes into [`StreamEvent`]s
#[derive(Debug, Default)]
pub struct SseFrameBuffer {
    /// Accumulated bytes not yet terminated by a newline
    buffer: String,
}

impl SseFrameBuffer {
    /// Create a new empty frame buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes from a TCP chunk, returning any complete events.
    ///
    /// Complete lines (terminated by `\n`) are extracted and decoded. A
    /// trailing partial line stays buffered for the next `feed()` call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        let text = String::from_utf8_lossy(bytes);
        self.buffer.push_str(&text);

        let mut events = Vec::new();

        while let Some(newline_pos) = self.buffer.find('\n') {
            let line = self.buffer[..newline_pos].trim_end_matches('\r').to_owned();
            self.buffer = self.buffer[newline_pos + 1..].to_owned();

            if let Some(event) = decode_line(&line) {
                events.push(event);
            }
        }

        events
    }

    /// Flush any remaining buffered content as a final event.
    ///
    /// Called when the byte stream ends with a partial line (no trailing
    /// newline).
    pub fn flush(&mut self) -> Vec<StreamEvent> {
        let remaining = mem::take(&mut self.buffer);
        decode_line(remaining.trim_end_matches('\r'))
            .into_iter()
            .collect()
    }
}

/// Decode one SSE line into an event, or `None` for separators, comments,
/// non-data fields, and undecodable payloads
fn decode_line(line: &str) -> Option<StreamEvent> {
    let trimmed = line.trim();

    // Empty lines are SSE event separators; ':' lines are comments
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }

    // Both "data: x" and "data:x" are valid SSE framing
    let payload = trimmed
        .strip_prefix("data: ")
        .or_else(|| trimmed.strip_prefix("data:"))?;

    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(parse_error) => {
            warn!(
                error = %parse_error,
                payload_len = payload.len(),
                "Skipping undecodable SSE frame"
            );
            None
        }
    }
}
