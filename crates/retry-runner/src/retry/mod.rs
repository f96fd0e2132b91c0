//! Policy-driven retry loop with exponential backoff.
//!
//! This module provides the retry loop itself and the pieces a caller plugs
//! into it: the decision a policy returns, the policy trait, and the backoff
//! arithmetic applied between attempts.
//!
//! # Key Types
//!
//! - [`RetryRunner`] - Dispatches retry loops onto an executor
//! - [`RetryPolicy`] - Decides after each failure whether to go on
//! - [`RetryDecision`] - `should_retry` plus the base delay
//! - [`Outcome`] - The future a caller awaits
//!
//! # Examples
//!
//! ```rust
//! use retry_runner::retry::{DefaultPolicy, RetryRunner};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = RetryRunner::new(tokio::runtime::Handle::current());
//! let attempts = Arc::new(AtomicU32::new(0));
//!
//! let counter = Arc::clone(&attempts);
//! let value = runner
//!     .run(
//!         move || {
//!             let counter = Arc::clone(&counter);
//!             async move {
//!                 if counter.fetch_add(1, Ordering::SeqCst) < 2 {
//!                     Err(std::io::Error::other("connection reset"))
//!                 } else {
//!                     Ok(42)
//!                 }
//!             }
//!         },
//!         DefaultPolicy::default(),
//!     )
//!     .await?;
//!
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

mod backoff;
mod decision;
mod outcome;
mod policy;
mod runner;
mod wait;

pub use backoff::{BACKOFF_MULTIPLIER, with_backoff};
pub use decision::RetryDecision;
pub use outcome::Outcome;
pub use policy::{DefaultPolicy, RetryPolicy};
pub use runner::{RetryRunner, run};
pub use wait::{WaitOutcome, wait};
