//! Error types for the retry runner
//!
//! Individual attempt failures never escape the runner on their own. A caller
//! only ever sees one of the terminal forms below, each carrying the ordered
//! history of every attempt that failed before the loop stopped.

use std::time::Duration;
use thiserror::Error;

/// Message carried by every [`AggregateFailure`].
pub const EXHAUSTED_MESSAGE: &str = "Exceeded retry count";

/// Result type alias for retried operations.
pub type Result<T, E> = std::result::Result<T, RetryError<E>>;

/// Terminal failure of a retried operation.
///
/// `E` is the opaque error type produced by each attempt. It carries no
/// bounds here, so `RetryError<E>` implements [`std::error::Error`] whenever
/// `E: Debug`.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The policy declined to retry after the last failure.
    #[error("{0}")]
    Exhausted(AggregateFailure<E>),

    /// The backoff wait between two attempts was interrupted.
    #[error("{0}")]
    Interrupted(InterruptedWait<E>),

    /// The task driving the loop ended without settling its outcome,
    /// e.g. because the policy panicked or the executor dropped the task.
    #[error("retry task ended before settling its outcome")]
    Abandoned,
}

impl<E> RetryError<E> {
    /// Every attempt failure recorded before the loop stopped, oldest first.
    ///
    /// Empty for [`RetryError::Abandoned`].
    pub fn causes(&self) -> &[E] {
        match self {
            Self::Exhausted(failure) => failure.causes(),
            Self::Interrupted(interrupted) => interrupted.causes(),
            Self::Abandoned => &[],
        }
    }

    /// Consume the error and return the recorded attempt failures.
    pub fn into_causes(self) -> Vec<E> {
        match self {
            Self::Exhausted(failure) => failure.into_causes(),
            Self::Interrupted(interrupted) => interrupted.into_causes(),
            Self::Abandoned => Vec::new(),
        }
    }

    /// Whether the policy gave up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }

    /// Whether a backoff wait was interrupted.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted(_))
    }
}

impl<E> From<AggregateFailure<E>> for RetryError<E> {
    fn from(failure: AggregateFailure<E>) -> Self {
        Self::Exhausted(failure)
    }
}

impl<E> From<InterruptedWait<E>> for RetryError<E> {
    fn from(interrupted: InterruptedWait<E>) -> Self {
        Self::Interrupted(interrupted)
    }
}

/// The policy declined further retries.
///
/// Built exactly once, when the loop gives up, from the full ordered history
/// of attempt failures. The history is never empty.
#[derive(Debug, Error)]
#[error("{message} ({} failed attempt(s))", .causes.len())]
pub struct AggregateFailure<E> {
    message: String,
    causes: Vec<E>,
}

impl<E> AggregateFailure<E> {
    pub(crate) fn new(causes: Vec<E>) -> Self {
        Self {
            message: EXHAUSTED_MESSAGE.to_string(),
            causes,
        }
    }

    /// Human-readable summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attempt failures, oldest first.
    pub fn causes(&self) -> &[E] {
        &self.causes
    }

    /// The failure that made the policy give up.
    pub fn last(&self) -> Option<&E> {
        self.causes.last()
    }

    /// Number of failed attempts.
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    /// Always false for failures produced by the runner.
    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    /// Consume and return the attempt failures.
    pub fn into_causes(self) -> Vec<E> {
        self.causes
    }
}

/// A backoff wait was interrupted by the environment.
///
/// Takes precedence over the decision that scheduled the wait: no further
/// attempt is made.
#[derive(Debug, Error)]
#[error(
    "backoff wait of {delay:?} interrupted after {} failed attempt(s)",
    .causes.len()
)]
pub struct InterruptedWait<E> {
    delay: Duration,
    causes: Vec<E>,
}

impl<E> InterruptedWait<E> {
    pub(crate) fn new(causes: Vec<E>, delay: Duration) -> Self {
        Self { delay, causes }
    }

    /// The wait that was cut short.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Attempt failures recorded before the interruption, oldest first.
    pub fn causes(&self) -> &[E] {
        &self.causes
    }

    /// Consume and return the attempt failures.
    pub fn into_causes(self) -> Vec<E> {
        self.causes
    }
}

/// Errors raised while loading [`BackoffConfig`](crate::config::BackoffConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that is not a non-negative integer.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value found in the environment
        value: String,
        /// Parse failure
        #[source]
        source: std::num::ParseIntError,
    },
}
