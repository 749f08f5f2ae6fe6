// ABOUTME: Streaming module covering event types, the producer relay, and frame parsing.
// ABOUTME: Guarantees consumers see ordered chunks followed by exactly one terminal event.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Analysis Streaming
//!
//! Event types and plumbing for streaming document analysis to clients
//! over Server-Sent Events. Producers write through [`StreamingRelay`],
//! which enforces the stream shape; consumers decode raw bytes back into
//! events with [`SseFrameBuffer`].

pub mod events;
pub mod relay;
pub mod sse_parser;

pub use events::StreamEvent;
pub use relay::StreamingRelay;
pub use sse_parser::SseFrameBuffer;
