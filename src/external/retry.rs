// ABOUTME: Retry policy with exponential backoff and transient-failure classification
// ABOUTME: Zero-retry by default; callers opt in per external service client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Scribe Meeting Intelligence

//! # Retry Policy
//!
//! External service clients run each request through a [`RetryPolicy`].
//! The default policy performs a single attempt; deployments that want
//! resilience against transient upstream failures raise `max_retries` in
//! configuration.
//!
//! Only transient failures are retried: connection errors, timeouts, and a
//! small set of HTTP statuses. Everything else, configuration errors above
//! all, surfaces immediately.

use crate::errors::{AppError, ErrorCode};
use rand::Rng;
use std::time::Duration;

/// Backoff schedule for retrying failed requests against one service
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 = no retries)
    pub max_retries: u32,
    /// Initial delay before first retry (milliseconds)
    pub initial_delay_ms: u64,
    /// Maximum delay cap for exponential backoff (milliseconds)
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }

    /// Standard schedule: 3 retries, 500ms initial, 5s cap
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }

    /// Standard delays with a configured retry count
    #[must_use]
    pub const fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }

    /// Calculate exponential backoff delay with jitter for a given attempt
    ///
    /// `delay = min(initial_ms * 2^attempt, max_ms) + jitter(0..100ms)`
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = self.initial_delay_ms.saturating_mul(1_u64 << attempt.min(32));
        let capped_delay = base_delay.min(self.max_delay_ms);
        // Small jitter (0-99ms) to avoid thundering herd
        let jitter = rand::thread_rng().gen_range(0..100);
        Duration::from_millis(capped_delay + jitter)
    }
}

/// Check if an HTTP error status code is retryable
///
/// Retryable errors are transient conditions that may resolve on retry:
/// - 429 Too Many Requests (rate limiting)
/// - 502 Bad Gateway (upstream issues)
/// - 503 Service Unavailable (temporary overload)
/// - 504 Gateway Timeout (upstream did not answer in time)
#[must_use]
pub const fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504)
}

/// Failure of one request attempt, classified for the retry loop
#[derive(Debug)]
pub enum AttemptFailure {
    /// Transient; the policy may schedule another attempt
    Retryable(AppError),
    /// Permanent for this request; surfaces immediately
    Fatal(AppError),
}

impl AttemptFailure {
    /// Classify a reqwest transport error
    #[must_use]
    pub fn from_request_error(service: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Retryable(AppError::external_timeout(service))
        } else if error.is_connect() {
            Self::Retryable(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{service} is unreachable: {error}"),
            ))
        } else {
            Self::Fatal(AppError::external_service(service, error.to_string()))
        }
    }

    /// Classify a non-success HTTP response
    #[must_use]
    pub fn from_status(service: &str, status: u16, body: &str) -> Self {
        let error = AppError::external_service(service, format!("HTTP {status}: {body}"));
        if is_retryable_status(status) {
            Self::Retryable(error)
        } else {
            Self::Fatal(error)
        }
    }

    /// Whether the retry loop may try again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }

    /// Unwrap into the underlying application error
    #[must_use]
    pub fn into_error(self) -> AppError {
        match self {
            Self::Retryable(error) | Self::Fatal(error) => error,
        }
    }
}
