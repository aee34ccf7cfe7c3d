//! Wall-clock timing for pipeline stages
//!
//! Blocking work and suspending work are timed by different wrappers; the
//! call site picks the one matching what it runs.

use std::future::Future;
use std::time::Instant;

/// Time a blocking closure and log its duration
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    tracing::info!("{} executed in {:.2} s", label, start.elapsed().as_secs_f64());
    result
}

/// Time a future until completion and log its duration
pub async fn timed_async<F>(label: &str, fut: F) -> F::Output
where
    F: Future,
{
    let start = Instant::now();
    let result = fut.await;
    tracing::info!("{} executed in {:.2} s", label, start.elapsed().as_secs_f64());
    result
}
