//! Bounded retry for provider calls that get throttled.
//!
//! The HTTP client drives a small state machine: every attempt either
//! succeeds, or its failure is fed to [`RetryPolicy::on_failure`], which
//! decides between backing off for another attempt and giving up. Only
//! rate-limit responses (HTTP 429) are ever retried.

use std::time::Duration;

use crate::errors::FetchError;

/// Outcome of feeding a failed attempt into the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Sleep for `delay`, then run attempt number `next_attempt`.
    Backoff { next_attempt: u32, delay: Duration },
    /// Surface the failure to the caller.
    GiveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn on_rate_limit(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Single attempt, never retried.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn should_retry(&self, error: &FetchError) -> bool {
        error.is_rate_limited()
    }

    /// `attempt` is 1-based: the number of the attempt that just failed.
    pub fn on_failure(&self, attempt: u32, error: &FetchError) -> RetryStep {
        if self.should_retry(error) && attempt < self.max_attempts {
            RetryStep::Backoff {
                next_attempt: attempt + 1,
                delay: self.backoff,
            }
        } else {
            RetryStep::GiveUp
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::on_rate_limit(3, Duration::from_millis(500))
    }
}
