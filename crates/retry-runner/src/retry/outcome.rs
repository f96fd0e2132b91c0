//! The caller-held future of a dispatched retry loop.

use crate::error::{Result, RetryError};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Settles exactly once with the result of a [`RetryRunner::run`] call.
///
/// Returned immediately; the loop itself runs on the runner's executor.
/// Dropping an `Outcome` does not stop the loop, it only discards the result.
///
/// [`RetryRunner::run`]: crate::RetryRunner::run
#[must_use = "an Outcome does nothing unless awaited"]
pub struct Outcome<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> Outcome<T, E> {
    pub(crate) fn new(rx: oneshot::Receiver<Result<T, E>>) -> Self {
        Self { rx }
    }
}

impl<T, E> Future for Outcome<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|settled| settled.unwrap_or(Err(RetryError::Abandoned)))
    }
}

impl<T, E> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AggregateFailure;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn test_pending_until_settled() {
        let (tx, rx) = oneshot::channel::<Result<u32, &str>>();
        let mut outcome = task::spawn(Outcome::new(rx));

        assert_pending!(outcome.poll());
        tx.send(Ok(5)).unwrap();
        assert!(outcome.is_woken());
        assert_eq!(assert_ready!(outcome.poll()).unwrap(), 5);
    }

    #[test]
    fn test_forwards_failure() {
        let (tx, rx) = oneshot::channel::<Result<u32, &str>>();
        let mut outcome = task::spawn(Outcome::new(rx));

        let _ = tx.send(Err(AggregateFailure::new(vec!["boom"]).into()));
        let err = assert_ready!(outcome.poll()).unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.causes(), &["boom"]);
    }

    #[test]
    fn test_dropped_sender_is_abandoned() {
        let (tx, rx) = oneshot::channel::<Result<u32, &str>>();
        let mut outcome = task::spawn(Outcome::new(rx));

        drop(tx);
        let err = assert_ready!(outcome.poll()).unwrap_err();
        assert!(matches!(err, RetryError::Abandoned));
    }
}
