//! The retry loop and the runner that dispatches it.

use super::backoff::with_backoff;
use super::outcome::Outcome;
use super::policy::RetryPolicy;
use super::wait::{WaitOutcome, wait};
use crate::error::{AggregateFailure, InterruptedWait, Result, RetryError};
use crate::executor::Executor;
use std::future::Future;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Drives a policy-governed retry loop for asynchronous operations.
///
/// Each call to [`RetryRunner::run`] dispatches one task onto the runner's
/// [`Executor`] and hands back an [`Outcome`] straight away. The task:
///
/// 1. calls the attempt factory and awaits the attempt;
/// 2. on success, settles the outcome with the value;
/// 3. on failure, records the error and asks the policy what to do;
/// 4. stops with [`RetryError::Exhausted`] if the policy declines, otherwise
///    waits `retry_after * 1.1^(retries - 1)` and loops.
///
/// The runner holds no per-run state, so one runner can drive any number of
/// concurrent, fully independent loops.
///
/// # Interruption
///
/// The runner owns a [`CancellationToken`] standing for the environment's
/// interrupt signal. Cancelling it cuts short every backoff wait in progress
/// (and every later one) for loops started from this runner, settling them
/// with [`RetryError::Interrupted`]. Attempts themselves are never
/// interrupted, and there is no per-attempt timeout: an attempt that never
/// completes stalls its loop. Build timeouts into the attempt future when
/// needed.
///
/// # Examples
///
/// ```rust
/// use retry_runner::{RetryDecision, RetryRunner};
/// use std::time::Duration;
///
/// # async fn example() {
/// let runner = RetryRunner::new(tokio::runtime::Handle::current());
///
/// let outcome = runner.run(
///     || async { Ok::<_, std::io::Error>(42) },
///     |_err: &std::io::Error, attempt: u32| {
///         if attempt < 3 {
///             RetryDecision::retry(Duration::from_millis(100))
///         } else {
///             RetryDecision::stop_retrying()
///         }
///     },
/// );
///
/// assert_eq!(outcome.await.unwrap(), 42);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RetryRunner<X> {
    executor: X,
    interrupt: CancellationToken,
}

impl<X: Executor> RetryRunner<X> {
    /// Create a runner that dispatches loops onto `executor`.
    pub fn new(executor: X) -> Self {
        Self {
            executor,
            interrupt: CancellationToken::new(),
        }
    }

    /// Use `interrupt` as the environment's interrupt signal.
    pub fn with_interrupt(mut self, interrupt: CancellationToken) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// A handle to the interrupt signal; cancel it to interrupt backoff waits.
    pub fn interrupt_handle(&self) -> CancellationToken {
        self.interrupt.clone()
    }

    /// The executor loops are dispatched onto.
    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Dispatch a retry loop and return its pending outcome.
    ///
    /// # Parameters
    /// - `attempt_factory`: produces a fresh, independent attempt on every call
    /// - `policy`: consulted once per failed attempt, with the attempt index
    ///   starting at 0
    pub fn run<T, E, F, Fut, P>(&self, attempt_factory: F, policy: P) -> Outcome<T, E>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        P: RetryPolicy<E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let interrupt = self.interrupt.clone();

        self.executor.execute(Box::pin(async move {
            let settled = drive(attempt_factory, policy, &interrupt).await;
            if tx.send(settled).is_err() {
                trace!("outcome dropped before the retry loop settled");
            }
        }));

        Outcome::new(rx)
    }

    /// Run the retry loop in place on the current task.
    ///
    /// Same semantics as [`RetryRunner::run`] without the dispatch, so no
    /// `Send` or `'static` bounds are required.
    pub async fn execute<T, E, F, Fut, P>(&self, attempt_factory: F, policy: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        P: RetryPolicy<E>,
    {
        drive(attempt_factory, policy, &self.interrupt).await
    }
}

/// Dispatch a retry loop onto `executor`.
///
/// Shorthand for `RetryRunner::new(executor).run(attempt_factory, policy)`;
/// the loop can not be interrupted.
pub fn run<X, T, E, F, Fut, P>(executor: X, attempt_factory: F, policy: P) -> Outcome<T, E>
where
    X: Executor,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    P: RetryPolicy<E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    RetryRunner::new(executor).run(attempt_factory, policy)
}

#[tracing::instrument(level = "debug", skip_all)]
async fn drive<T, E, F, Fut, P>(
    mut attempt_factory: F,
    mut policy: P,
    interrupt: &CancellationToken,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    P: RetryPolicy<E>,
{
    let mut failures = Vec::new();
    let mut retries: u32 = 0;

    loop {
        let error = match attempt_factory().await {
            Ok(value) => {
                trace!(retries, "attempt succeeded");
                return Ok(value);
            }
            Err(error) => error,
        };

        let decision = policy.decide(&error, retries);
        failures.push(error);

        if !decision.should_retry {
            warn!(
                failed_attempts = failures.len(),
                "policy declined further retries"
            );
            return Err(RetryError::Exhausted(AggregateFailure::new(failures)));
        }

        retries = retries.saturating_add(1);
        let delay = with_backoff(decision.retry_after, retries);
        debug!(
            retry = retries,
            base = ?decision.retry_after,
            delay = ?delay,
            "attempt failed, backing off"
        );

        if wait(delay, interrupt).await == WaitOutcome::Interrupted {
            warn!(
                failed_attempts = failures.len(),
                delay = ?delay,
                "backoff wait interrupted"
            );
            return Err(RetryError::Interrupted(InterruptedWait::new(
                failures, delay,
            )));
        }
    }
}
