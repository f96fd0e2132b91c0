//! Retry policies: the caller-supplied decision callback.

use super::decision::RetryDecision;
use crate::config::BackoffConfig;
use std::time::Duration;

/// Decides, after each failed attempt, whether and when to try again.
///
/// Implemented for every `FnMut(&E, u32) -> RetryDecision` closure, so most
/// callers pass a closure. The runner calls [`RetryPolicy::decide`] exactly
/// once per failed attempt, in order, and never after a success.
///
/// A policy is trusted: it cannot report an error, and a panic inside it is
/// not caught by the runner.
///
/// # Examples
///
/// ```rust
/// use retry_runner::retry::{RetryDecision, RetryPolicy};
/// use std::time::Duration;
///
/// let mut policy = |_err: &std::io::Error, attempt: u32| {
///     if attempt < 3 {
///         RetryDecision::retry(Duration::from_millis(100))
///     } else {
///         RetryDecision::stop_retrying()
///     }
/// };
///
/// let err = std::io::Error::other("boom");
/// assert!(policy.decide(&err, 0).should_retry);
/// assert!(!policy.decide(&err, 3).should_retry);
/// ```
pub trait RetryPolicy<E> {
    /// Inspect the latest failure and return the next decision.
    ///
    /// # Parameters
    /// - `error`: The error from the most recent attempt
    /// - `attempt`: Index of the failed attempt (0 for the first failure)
    fn decide(&mut self, error: &E, attempt: u32) -> RetryDecision;
}

impl<E, F> RetryPolicy<E> for F
where
    F: FnMut(&E, u32) -> RetryDecision,
{
    fn decide(&mut self, error: &E, attempt: u32) -> RetryDecision {
        self(error, attempt)
    }
}

/// Stock policy: retry every failure with a fixed base delay until
/// `max_retries` failures have been seen.
///
/// Defaults to 10 retries with a 50ms base delay. The error itself is not
/// inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultPolicy {
    max_retries: u32,
    delay: Duration,
}

impl DefaultPolicy {
    /// Build a policy from configuration.
    pub fn new(config: &BackoffConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.default_delay.min(config.max_delay),
        }
    }

    /// The decision for the failure at index `attempt`.
    pub fn decision_for(&self, attempt: u32) -> RetryDecision {
        if attempt < self.max_retries {
            RetryDecision::after(self.delay)
        } else {
            RetryDecision::stop_retrying()
        }
    }

    /// Maximum number of retries this policy allows.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Base delay returned with every retry decision.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self::new(&BackoffConfig::default())
    }
}

impl<E> RetryPolicy<E> for DefaultPolicy {
    fn decide(&mut self, _error: &E, attempt: u32) -> RetryDecision {
        self.decision_for(attempt)
    }
}
