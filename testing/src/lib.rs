//! # Eventdesk Testing
//!
//! Testing utilities and doubles for the Eventdesk workspace.
//!
//! This crate provides:
//! - [`ScriptedFetcher`]: a fetcher double returning a scripted sequence of
//!   results, each after an optional virtual delay, for deterministic race
//!   tests under `tokio::time::pause`
//! - [`CommitSpy`]: counts the state commits observed on a binding's watch
//!   channel (verifies that nothing mutates state after detach)
//! - [`init_tracing`]: installs a test subscriber honoring `RUST_LOG`
//!
//! ## Example
//!
//! ```ignore
//! let script = ScriptedFetcher::new();
//! script.push_ok(Duration::from_millis(50), vec![activity]);
//!
//! let binding = ResourceBinding::new("evt_1".to_owned(), script.fetcher());
//! let spy = CommitSpy::attach(binding.subscribe());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eventdesk_binding::AsyncState;
use eventdesk_client::ApiError;
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;

/// One scripted response: a result delivered after a delay.
#[derive(Debug, Clone)]
pub struct ScriptedStep<T> {
    /// Virtual time to wait before resolving
    pub delay: Duration,
    /// Result the fetch resolves to
    pub result: Result<T, ApiError>,
}

/// A fetcher double that replays a scripted sequence of results.
///
/// Each invocation pops the next step, sleeps its delay, and resolves to
/// its result. An exhausted script resolves to a retryable unclassified
/// error, so a test that over-fetches fails loudly rather than hanging.
#[derive(Debug)]
pub struct ScriptedFetcher<T> {
    script: Arc<Mutex<VecDeque<ScriptedStep<T>>>>,
}

impl<T> ScriptedFetcher<T>
where
    T: Send + 'static,
{
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Append a successful response.
    pub fn push_ok(&self, delay: Duration, data: T) {
        self.push(ScriptedStep {
            delay,
            result: Ok(data),
        });
    }

    /// Append a failed response.
    pub fn push_err(&self, delay: Duration, error: ApiError) {
        self.push(ScriptedStep {
            delay,
            result: Err(error),
        });
    }

    /// Append a step.
    pub fn push(&self, step: ScriptedStep<T>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(step);
        }
    }

    /// Number of steps not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().map_or(0, |script| script.len())
    }

    /// A keyed fetcher suitable for `ResourceBinding`.
    ///
    /// The key is ignored; consumption order is the script order.
    #[must_use]
    pub fn fetcher<K>(&self) -> impl Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static {
        let script = Arc::clone(&self.script);
        move |_key: K| next_step(&script)
    }

    /// A zero-argument fetcher suitable for `PollingSubscription`.
    #[must_use]
    pub fn poll_fetcher(&self) -> impl Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static {
        let script = Arc::clone(&self.script);
        move || next_step(&script)
    }
}

impl<T> Default for ScriptedFetcher<T>
where
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ScriptedFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            script: Arc::clone(&self.script),
        }
    }
}

fn next_step<T>(
    script: &Arc<Mutex<VecDeque<ScriptedStep<T>>>>,
) -> BoxFuture<'static, Result<T, ApiError>>
where
    T: Send + 'static,
{
    let step = script.lock().ok().and_then(|mut script| script.pop_front());
    async move {
        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.result
            }
            None => Err(ApiError::ambiguous("scripted fetcher exhausted")),
        }
    }
    .boxed()
}

/// Counts the state commits observed on a binding's watch channel.
///
/// Attach before triggering the behavior under test; every committed state
/// change increments the counter. The initial value present at attach time
/// is not counted.
#[derive(Debug)]
pub struct CommitSpy {
    commits: Arc<AtomicUsize>,
    task: tokio::task::JoinHandle<()>,
}

impl CommitSpy {
    /// Attach to a state channel and start counting.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn attach<T>(mut states: watch::Receiver<AsyncState<T>>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let commits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&commits);

        let task = tokio::spawn(async move {
            while states.changed().await.is_ok() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        Self { commits, task }
    }

    /// Commits observed so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl Drop for CommitSpy {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Install a `fmt` subscriber honoring `RUST_LOG`, ignoring double-init.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_script_is_consumed_in_order() {
        let script = ScriptedFetcher::new();
        script.push_ok(Duration::ZERO, 1_u32);
        script.push_ok(Duration::ZERO, 2_u32);

        let fetch = script.fetcher::<()>();
        assert_eq!(fetch(()).await, Ok(1));
        assert_eq!(fetch(()).await, Ok(2));
        assert_eq!(script.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_script_fails_loudly() {
        let script = ScriptedFetcher::<u32>::new();
        let fetch = script.poll_fetcher();

        let result = fetch().await;
        assert!(matches!(result, Err(ApiError::Unknown { status: None, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_delay_is_respected() {
        let script = ScriptedFetcher::new();
        script.push_ok(Duration::from_millis(50), 7_u32);

        let fetch = script.fetcher::<()>();
        let started = tokio::time::Instant::now();
        assert_eq!(fetch(()).await, Ok(7));
        assert_eq!(started.elapsed(), Duration::from_millis(50));
    }
}
