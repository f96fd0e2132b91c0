//! Example: Retrying a flaky operation with the retry runner
//!
//! This example demonstrates:
//! 1. The stock policy loaded from the environment
//! 2. A custom policy that only retries "network" errors
//! 3. Interrupting a loop while it is backing off
//!
//! Run with:
//! ```bash
//! RUST_LOG=retry_runner=debug cargo run -p retry-runner --example retry_example
//! ```

use retry_runner::prelude::*;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// A simulated API that fails the first few times
#[derive(Clone)]
struct UnreliableApi {
    attempts: Arc<AtomicU32>,
    fail_count: u32,
    failure: &'static str,
}

impl UnreliableApi {
    fn new(fail_count: u32, failure: &'static str) -> Self {
        Self {
            attempts: Arc::new(AtomicU32::new(0)),
            fail_count,
            failure,
        }
    }

    async fn call(&self) -> Result<String, std::io::Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.fail_count {
            println!("  Attempt {}: FAILED ({})", attempt + 1, self.failure);
            Err(std::io::Error::other(self.failure))
        } else {
            println!("  Attempt {}: SUCCESS", attempt + 1);
            Ok("API response data".to_string())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Example 1: Stock policy configured from the environment
async fn example_default_policy(runner: &RetryRunner<Handle>) -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Default Policy ===\n");

    let config = BackoffConfig::from_env()?;
    println!(
        "Policy: up to {} retries, base delay {:?}",
        config.max_retries, config.default_delay
    );

    let api = UnreliableApi::new(3, "transient error");
    let start = Instant::now();

    let caller = api.clone();
    let result = runner
        .run(
            move || {
                let api = caller.clone();
                async move { api.call().await }
            },
            config.policy(),
        )
        .await?;

    println!("\nResult: {}", result);
    println!("Total attempts: {}", api.total_attempts());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}

/// Example 2: Custom policy (only retry network errors)
async fn example_custom_policy(runner: &RetryRunner<Handle>) {
    println!("\n=== Example 2: Custom Policy (Network Errors Only) ===\n");

    let policy = |err: &std::io::Error, attempt: u32| {
        if err.to_string().contains("network") && attempt < 5 {
            RetryDecision::retry(Duration::from_millis(100))
        } else {
            RetryDecision::stop_retrying()
        }
    };

    let api = UnreliableApi::new(10, "authentication failed");
    let caller = api.clone();
    let outcome = runner
        .run(
            move || {
                let api = caller.clone();
                async move { api.call().await }
            },
            policy,
        )
        .await;

    match outcome {
        Ok(value) => println!("\nUnexpected success: {}", value),
        Err(err) => {
            println!("\nGave up: {}", err);
            for (i, cause) in err.causes().iter().enumerate() {
                println!("  cause {}: {}", i + 1, cause);
            }
        }
    }
    println!("Total attempts: {} (not retried)", api.total_attempts());
}

/// Example 3: Interrupting a loop during its backoff wait
async fn example_interrupt() {
    println!("\n=== Example 3: Interrupted Backoff ===\n");

    let runner = RetryRunner::new(Handle::current());
    let interrupt = runner.interrupt_handle();

    let api = UnreliableApi::new(u32::MAX, "network unreachable");
    let caller = api.clone();
    let outcome = runner.run(
        move || {
            let api = caller.clone();
            async move { api.call().await }
        },
        |_: &std::io::Error, _: u32| RetryDecision::retry(Duration::from_secs(5)),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("  Interrupting...");
    interrupt.cancel();

    match outcome.await {
        Err(RetryError::Interrupted(interrupted)) => println!("\n{}", interrupted),
        other => println!("\nUnexpected outcome: {:?}", other),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let runner = RetryRunner::new(Handle::current());

    example_default_policy(&runner).await?;
    example_custom_policy(&runner).await;
    example_interrupt().await;

    Ok(())
}
