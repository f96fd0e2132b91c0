//! Interruptible backoff wait.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a backoff wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full delay passed.
    Elapsed,
    /// The interrupt signal fired first (or had already fired).
    Interrupted,
}

/// Sleep for `delay` unless `interrupt` is cancelled first.
///
/// An already-cancelled token wins even for a zero delay. Delays too large
/// for the timer wheel sleep until tokio's far-future deadline.
pub async fn wait(delay: Duration, interrupt: &CancellationToken) -> WaitOutcome {
    tokio::select! {
        biased;
        () = interrupt.cancelled() => WaitOutcome::Interrupted,
        () = tokio::time::sleep(delay) => WaitOutcome::Elapsed,
    }
}
