#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Fault-tolerant execution of unreliable asynchronous operations.
//!
//! A [`RetryRunner`] executes an async operation and, on failure, asks a
//! caller-supplied [`RetryPolicy`] whether to try again and how long to wait.
//! Waits grow by a fixed factor of 1.1 per retry. The caller holds a single
//! [`Outcome`] that settles exactly once, with the value or with one terminal
//! [`RetryError`] carrying every failure seen.
//!
//! - **Explicit execution context** via the [`Executor`] trait
//! - **Closures or policy objects** via [`RetryPolicy`]
//! - **Interruptible backoff** via the runner's interrupt handle
//! - **Environment-driven defaults** via [`BackoffConfig`]
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use retry_runner::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = RetryRunner::new(tokio::runtime::Handle::current());
//!
//! let result = runner
//!     .run(
//!         || async { Ok::<_, std::io::Error>(42) },
//!         |_err: &std::io::Error, attempt: u32| {
//!             if attempt < 3 {
//!                 RetryDecision::retry(Duration::from_millis(100))
//!             } else {
//!                 RetryDecision::stop_retrying()
//!             }
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod retry;

pub use config::BackoffConfig;
pub use error::{AggregateFailure, ConfigError, InterruptedWait, Result, RetryError};
pub use executor::Executor;
pub use retry::{
    DefaultPolicy, Outcome, RetryDecision, RetryPolicy, RetryRunner, WaitOutcome, run,
};

/// Convenient re-exports of commonly used items.
///
/// Import everything needed to run a retry loop with:
///
/// ```rust
/// use retry_runner::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::BackoffConfig;
    pub use crate::error::{AggregateFailure, InterruptedWait, RetryError};
    pub use crate::executor::Executor;
    pub use crate::retry::{DefaultPolicy, Outcome, RetryDecision, RetryPolicy, RetryRunner};
}
