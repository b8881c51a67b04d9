//! Retry on internal server errors.
//!
//! # Responsibilities
//! - Classify failures as retryable (500) or terminal (everything else)
//! - Re-execute the identical request until it stops failing with a 500
//!   or the retry limit is spent
//! - Stop issuing attempts once the caller abandons the request
//!
//! # Design Decisions
//! - Attempts are sequential; attempt N+1 starts after attempt N resolved
//! - No delay between attempts
//! - The attempt counter lives on the stack of one logical request
//! - Exhaustion forwards the last 500 untouched

use std::future::Future;

use axum::http::StatusCode;

use crate::observability::metrics;
use crate::resilience::outcome::{Failure, Outcome};

/// Returns true if a failure with this status should be retried.
pub fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::INTERNAL_SERVER_ERROR
}

/// Retry policy for internal server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts after the first one.
    retry_limit: u32,
}

impl RetryPolicy {
    pub const DEFAULT_RETRY_LIMIT: u32 = 3;

    pub fn new(retry_limit: u32) -> Self {
        Self { retry_limit }
    }

    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    /// Decide whether `failure` earns another attempt after `retries` retries.
    pub fn should_retry(&self, failure: &Failure, retries: u32) -> bool {
        is_retryable(failure.status()) && retries < self.retry_limit
    }

    /// Run `execute` against `request` until it succeeds, fails terminally,
    /// or the retry limit is spent.
    ///
    /// The returned outcome is always one produced by `execute`. Dropping the
    /// returned future abandons the request and no further attempt is made.
    pub async fn execute<Req, T, F, Fut>(&self, request: &Req, mut execute: F) -> Outcome<T>
    where
        F: FnMut(&Req) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        let mut retries = 0u32;

        loop {
            let failure = match execute(request).await {
                Ok(response) => {
                    if retries > 0 {
                        tracing::debug!(attempt = retries + 1, "Request recovered after retry");
                    }
                    return Ok(response);
                }
                Err(failure) => failure,
            };

            if self.should_retry(&failure, retries) {
                retries += 1;
                metrics::record_retry();
                tracing::info!(
                    attempt = retries + 1,
                    retry_limit = self.retry_limit,
                    status = %failure.status(),
                    "Retrying request after internal server error"
                );
                continue;
            }

            if is_retryable(failure.status()) {
                metrics::record_retry_exhausted();
                tracing::warn!(
                    attempts = retries + 1,
                    retry_limit = self.retry_limit,
                    reason = %failure.reason(),
                    "Retry limit reached"
                );
            } else {
                tracing::debug!(
                    attempt = retries + 1,
                    status = %failure.status(),
                    "Terminal failure, not retrying"
                );
            }
            return Err(failure);
        }
    }

    /// Like [`RetryPolicy::execute`], but gives up as soon as `abandoned`
    /// resolves. Returns `None` when the request was abandoned; the attempt in
    /// flight is dropped and no further attempt is issued.
    pub async fn execute_until<Req, T, F, Fut, A>(
        &self,
        request: &Req,
        execute: F,
        abandoned: A,
    ) -> Option<Outcome<T>>
    where
        F: FnMut(&Req) -> Fut,
        Fut: Future<Output = Outcome<T>>,
        A: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = abandoned => {
                tracing::debug!("Request abandoned, suppressing further attempts");
                None
            }
            outcome = self.execute(request, execute) => Some(outcome),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RETRY_LIMIT)
    }
}
