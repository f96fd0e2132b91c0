//! The value a policy returns after every failed attempt.

use std::time::Duration;

/// Whether to try again, and the base delay to wait first.
///
/// A policy produces a fresh decision after every failed attempt. The
/// `retry_after` delay is the *base* of the next wait: the runner scales it by
/// [`BACKOFF_MULTIPLIER`](super::BACKOFF_MULTIPLIER) once per prior retry.
///
/// # Examples
///
/// ```rust
/// use retry_runner::retry::RetryDecision;
/// use std::time::Duration;
///
/// let stop = RetryDecision::stop_retrying();
/// assert!(!stop.should_retry);
///
/// // Requests above `MAX_DELAY` are capped
/// let again = RetryDecision::retry(Duration::from_secs(30));
/// assert!(again.should_retry);
/// assert_eq!(again.retry_after, RetryDecision::MAX_DELAY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryDecision {
    /// Try the operation again.
    pub should_retry: bool,

    /// Base delay before the next attempt. Ignored when `should_retry` is false.
    pub retry_after: Duration,
}

impl RetryDecision {
    /// Ceiling applied by [`RetryDecision::retry`].
    pub const MAX_DELAY: Duration = Duration::from_secs(10);

    /// Give up; the runner settles with every failure seen so far.
    pub const fn stop_retrying() -> Self {
        Self {
            should_retry: false,
            retry_after: Duration::ZERO,
        }
    }

    /// Retry after `delay`, capped at [`RetryDecision::MAX_DELAY`].
    pub fn retry(delay: Duration) -> Self {
        Self::after(delay.min(Self::MAX_DELAY))
    }

    /// Retry after exactly `delay`, without any cap.
    pub const fn after(delay: Duration) -> Self {
        Self {
            should_retry: true,
            retry_after: delay,
        }
    }
}

impl Default for RetryDecision {
    fn default() -> Self {
        Self::stop_retrying()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_stop_retrying() {
        let decision = RetryDecision::stop_retrying();
        assert!(!decision.should_retry);
        assert_eq!(decision.retry_after, Duration::ZERO);
        assert_eq!(decision, RetryDecision::default());
    }

    #[rstest]
    #[case(Duration::ZERO, Duration::ZERO)]
    #[case(Duration::from_millis(50), Duration::from_millis(50))]
    #[case(Duration::from_secs(10), Duration::from_secs(10))]
    #[case(Duration::from_secs(11), Duration::from_secs(10))]
    #[case(Duration::MAX, Duration::from_secs(10))]
    fn test_retry_caps_delay(#[case] requested: Duration, #[case] expected: Duration) {
        let decision = RetryDecision::retry(requested);
        assert!(decision.should_retry);
        assert_eq!(decision.retry_after, expected);
    }

    #[test]
    fn test_after_is_uncapped() {
        let decision = RetryDecision::after(Duration::from_secs(3600));
        assert!(decision.should_retry);
        assert_eq!(decision.retry_after, Duration::from_secs(3600));
    }
}
