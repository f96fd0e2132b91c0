//! Execution contexts that run the retry loop.
//!
//! The runner never picks a global pool: each [`RetryRunner`](crate::RetryRunner)
//! is handed an [`Executor`] and dispatches one task per `run` call onto it.

use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Accepts a unit of work and eventually runs it without blocking the caller.
///
/// # Examples
///
/// ```rust
/// use futures::future::BoxFuture;
/// use retry_runner::Executor;
///
/// /// Runs every task on the ambient tokio runtime.
/// struct Ambient;
///
/// impl Executor for Ambient {
///     fn execute(&self, task: BoxFuture<'static, ()>) {
///         tokio::spawn(task);
///     }
/// }
/// ```
pub trait Executor: Send + Sync {
    /// Schedule `task`. Must not block until the task completes.
    fn execute(&self, task: BoxFuture<'static, ()>);
}

impl Executor for Handle {
    fn execute(&self, task: BoxFuture<'static, ()>) {
        // Detached: the outcome channel reports completion.
        self.spawn(task);
    }
}

impl<X: Executor + ?Sized> Executor for Arc<X> {
    fn execute(&self, task: BoxFuture<'static, ()>) {
        (**self).execute(task);
    }
}

impl<X: Executor + ?Sized> Executor for Box<X> {
    fn execute(&self, task: BoxFuture<'static, ()>) {
        (**self).execute(task);
    }
}

impl<X: Executor + ?Sized> Executor for &X {
    fn execute(&self, task: BoxFuture<'static, ()>) {
        (**self).execute(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_handle_runs_task() {
        let ran = Arc::new(AtomicBool::new(false));
        let (tx, rx) = tokio::sync::oneshot::channel();

        let flag = Arc::clone(&ran);
        Handle::current().execute(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
            let _ = tx.send(());
        }));

        rx.await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_shared_executor_forwards() {
        let executor: Arc<dyn Executor> = Arc::new(Handle::current());
        let (tx, rx) = tokio::sync::oneshot::channel();

        executor.execute(Box::pin(async move {
            let _ = tx.send(7);
        }));

        assert_eq!(rx.await.unwrap(), 7);
    }
}
