//! Exponential backoff arithmetic.

use std::time::Duration;

/// Growth factor applied to the policy's base delay for every prior retry.
pub const BACKOFF_MULTIPLIER: f64 = 1.1;

/// Compute the wait before retry number `retry_count` (1-based).
///
/// The first retry waits exactly `base`; every later retry multiplies the
/// base by [`BACKOFF_MULTIPLIER`] once more. The base is whatever the most
/// recent [`RetryDecision`](super::RetryDecision) asked for, so the growth is
/// relative to the current base, not to the previous wait.
///
/// # Mathematical Formula
///
/// ```text
/// delay = base * BACKOFF_MULTIPLIER ^ (retry_count - 1)
/// ```
///
/// A `retry_count` of 0 is treated like 1. Products that do not fit in a
/// [`Duration`] saturate at [`Duration::MAX`].
///
/// # Examples
///
/// ```rust
/// use retry_runner::retry::with_backoff;
/// use std::time::Duration;
///
/// let base = Duration::from_millis(100);
/// assert_eq!(with_backoff(base, 1), base);
/// assert_eq!(with_backoff(Duration::from_secs(u64::MAX), 50), Duration::MAX);
/// ```
pub fn with_backoff(base: Duration, retry_count: u32) -> Duration {
    let exponent = retry_count.saturating_sub(1);
    if exponent == 0 || base.is_zero() {
        return base;
    }

    let secs = base.as_secs_f64() * BACKOFF_MULTIPLIER.powf(f64::from(exponent));
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: Duration, expected_nanos: f64) {
        let diff = (actual.as_nanos() as f64 - expected_nanos).abs();
        assert!(
            diff <= 1_000.0,
            "expected ~{}ns, got {:?} (off by {}ns)",
            expected_nanos,
            actual,
            diff
        );
    }

    #[test]
    fn test_first_retry_uses_raw_base() {
        let base = Duration::from_millis(100);
        assert_eq!(with_backoff(base, 1), base);
    }

    #[test]
    fn test_zero_retry_count_behaves_like_first() {
        let base = Duration::from_millis(250);
        assert_eq!(with_backoff(base, 0), base);
    }

    #[test]
    fn test_growth_law() {
        let base = Duration::from_millis(100);

        // 100ms * 1.1^1 = 110ms
        assert_close(with_backoff(base, 2), 110_000_000.0);
        // 100ms * 1.1^2 = 121ms
        assert_close(with_backoff(base, 3), 121_000_000.0);
        // 100ms * 1.1^3 = 133.1ms
        assert_close(with_backoff(base, 4), 133_100_000.0);
    }

    #[test]
    fn test_zero_base_stays_zero() {
        assert_eq!(with_backoff(Duration::ZERO, 1), Duration::ZERO);
        assert_eq!(with_backoff(Duration::ZERO, u32::MAX), Duration::ZERO);
    }

    #[test]
    fn test_overflow_clamps_to_max() {
        // 1.1^10_000 is infinite as an f64
        assert_eq!(
            with_backoff(Duration::from_millis(1), 10_000),
            Duration::MAX
        );
        assert_eq!(
            with_backoff(Duration::from_secs(u64::MAX / 2), 20),
            Duration::MAX
        );
        assert_eq!(with_backoff(Duration::MAX, 2), Duration::MAX);
    }

    proptest! {
        /// Property: waits never shrink as the retry count grows
        #[test]
        fn prop_backoff_is_monotonic(
            base_ms in 0u64..10_000_000,
            retry in 1u32..2_000,
        ) {
            let base = Duration::from_millis(base_ms);
            prop_assert!(with_backoff(base, retry + 1) >= with_backoff(base, retry));
        }

        /// Property: successive waits differ by the multiplier
        #[test]
        fn prop_successive_ratio_is_multiplier(
            base_ms in 1u64..100_000,
            retry in 1u32..60,
        ) {
            let base = Duration::from_millis(base_ms);
            let current = with_backoff(base, retry).as_secs_f64();
            let next = with_backoff(base, retry + 1).as_secs_f64();
            let ratio = next / current;
            prop_assert!((ratio - BACKOFF_MULTIPLIER).abs() < 1e-5);
        }

        /// Property: any input yields a valid duration
        #[test]
        fn prop_never_panics(
            secs in any::<u64>(),
            nanos in 0u32..1_000_000_000,
            retry in any::<u32>(),
        ) {
            let delay = with_backoff(Duration::new(secs, nanos), retry);
            prop_assert!(delay >= Duration::new(secs, nanos) || delay == Duration::MAX);
        }
    }
}
