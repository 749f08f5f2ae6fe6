// ABOUTME: Single-producer relay that enforces stream ordering for analysis consumers.
// ABOUTME: Chunks flow until one terminal event closes the relay; late emissions are defects.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Streaming Relay
//!
//! Producer-side handle for one analysis stream. The relay owns the only
//! sender, and every emit method takes `&mut self`, so interleaved writers
//! are impossible by construction. After a terminal event the relay is
//! closed; emitting into a closed relay is a programming defect and comes
//! back as an internal error.
//!
//! A dropped consumer is not an error. Clients disconnect mid-stream all
//! the time, so sends into a closed channel are logged and ignored; the
//! relay cancels its [`cancellation`](StreamingRelay::cancellation) token
//! instead, so producers with expensive work left can stop early.

use std::future::Future;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::errors::{AppError, AppResult};

use super::events::StreamEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelayState {
    Open,
    Closed,
}

/// Producer-side handle for one analysis stream
#[derive(Debug)]
pub struct StreamingRelay {
    sender: mpsc::UnboundedSender<StreamEvent>,
    state: RelayState,
    cancellation: CancellationToken,
}

impl StreamingRelay {
    /// Create a relay and the receiver its consumer reads from
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StreamEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                state: RelayState::Open,
                cancellation: CancellationToken::new(),
            },
            receiver,
        )
    }

    /// Token cancelled once the consumer is known to be gone.
    ///
    /// Clone this into a `ToolExecutionContext` (or select on it) so tool
    /// calls feeding the stream stop instead of computing results nobody
    /// will read. Detection happens on the first emit after the consumer
    /// dropped its receiver.
    #[must_use]
    pub fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Emit an incremental chunk.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the relay has already emitted its
    /// terminal event.
    pub fn emit_chunk(&mut self, data: Value) -> AppResult<()> {
        self.emit(StreamEvent::chunk(data))
    }

    /// Emit the successful terminal event and close the relay.
    ///
    /// # Errors
    ///
    /// Returns an internal error when a terminal event was already sent.
    pub fn complete(&mut self, data: Value) -> AppResult<()> {
        let outcome = self.emit(StreamEvent::complete(data));
        self.state = RelayState::Closed;
        outcome
    }

    /// Emit the failed terminal event and close the relay.
    ///
    /// # Errors
    ///
    /// Returns an internal error when a terminal event was already sent.
    pub fn fail(&mut self, error: impl Into<String>) -> AppResult<()> {
        let outcome = self.emit(StreamEvent::error(error));
        self.state = RelayState::Closed;
        outcome
    }

    /// Emit the successful terminal event, then run `followup` in the
    /// background.
    ///
    /// The consumer sees `Complete` immediately; post-stream work such as
    /// indexing the analysis must never delay or resurface into the
    /// stream, so followup failures are logged and swallowed.
    ///
    /// # Errors
    ///
    /// Returns an internal error when a terminal event was already sent.
    /// The followup is not spawned in that case.
    pub fn complete_with_followup<F>(&mut self, data: Value, followup: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.complete(data)?;
        tokio::spawn(async move {
            if let Err(error) = followup.await {
                warn!(error = %error, "Post-completion followup failed");
            }
        });
        Ok(())
    }

    /// Whether a terminal event has been emitted
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == RelayState::Closed
    }

    fn emit(&mut self, event: StreamEvent) -> AppResult<()> {
        if self.state == RelayState::Closed {
            error!("Attempted to emit into a completed stream");
            return Err(AppError::internal("Stream already completed"));
        }

        if self.sender.send(event).is_err() {
            debug!("Stream consumer disconnected, dropping event");
            self.cancellation.cancel();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_chunks_arrive_in_order_before_terminal() {
        let (mut relay, mut receiver) = StreamingRelay::channel();
        relay.emit_chunk(json!({ "n": 1 })).unwrap();
        relay.emit_chunk(json!({ "n": 2 })).unwrap();
        relay.complete(json!({ "done": true })).unwrap();

        assert_eq!(receiver.recv().await.unwrap(), StreamEvent::chunk(json!({ "n": 1 })));
        assert_eq!(receiver.recv().await.unwrap(), StreamEvent::chunk(json!({ "n": 2 })));
        assert!(receiver.recv().await.unwrap().is_terminal());
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_emitting_after_terminal_is_an_error() {
        let (mut relay, _receiver) = StreamingRelay::channel();
        relay.complete(json!({})).unwrap();
        assert!(relay.is_closed());
        assert!(relay.emit_chunk(json!({})).is_err());
        assert!(relay.fail("late").is_err());
    }

    #[tokio::test]
    async fn test_dropped_consumer_does_not_error() {
        let (mut relay, receiver) = StreamingRelay::channel();
        drop(receiver);
        assert!(relay.emit_chunk(json!({ "n": 1 })).is_ok());
        assert!(relay.complete(json!({})).is_ok());
    }

    #[tokio::test]
    async fn test_dropped_consumer_cancels_the_relay_token() {
        let (mut relay, receiver) = StreamingRelay::channel();
        let token = relay.cancellation();
        assert!(!token.is_cancelled());

        drop(receiver);
        relay.emit_chunk(json!({ "n": 1 })).unwrap();

        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_followup_runs_after_terminal() {
        let (mut relay, mut receiver) = StreamingRelay::channel();
        let (done_tx, done_rx) = tokio::sync::oneshot::channel();

        relay
            .complete_with_followup(json!({ "done": true }), async move {
                let _ = done_tx.send(());
                Ok(())
            })
            .unwrap();

        assert!(receiver.recv().await.unwrap().is_terminal());
        done_rx.await.unwrap();
    }
}
