//! Periodic polling subscriptions for live feeds.
//!
//! A [`PollingSubscription`] layers a repeating timer over the same
//! fetch-and-commit primitive as a resource binding, with identical
//! stale-commit gating. It is an explicit start/stop handle, so non-UI
//! consumers and tests can drive it deterministically.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use eventdesk_client::ApiError;
use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::state::AsyncState;

/// A cancellable periodic fetch, publishing each result on a watch channel.
///
/// The first fetch runs immediately on start; subsequent fetches run once
/// per interval. Fetches are strictly sequential -- a tick never starts
/// while the previous fetch is still in flight.
pub struct PollingSubscription<T> {
    generation: Arc<AtomicU64>,
    tx: Arc<watch::Sender<AsyncState<T>>>,
    task: tokio::task::JoinHandle<()>,
}

impl<T> PollingSubscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start polling with the given interval.
    ///
    /// Must be called from within a Tokio runtime; the poll loop runs as a
    /// spawned task until [`stop`](Self::stop) is called or the handle is
    /// dropped.
    pub fn start<F>(interval: Duration, fetcher: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + 'static,
    {
        let (tx, _rx) = watch::channel(AsyncState::loading());
        let tx = Arc::new(tx);
        let generation = Arc::new(AtomicU64::new(0));

        let gate = Arc::clone(&generation);
        let tx_task = Arc::clone(&tx);
        let task = tokio::spawn(async move {
            let started = gate.load(Ordering::SeqCst);
            let mut ticker = tokio::time::interval(interval);

            loop {
                ticker.tick().await;

                let state = match fetcher().await {
                    Ok(data) => AsyncState::loaded(data),
                    Err(err) => {
                        tracing::debug!(error = %err, "poll fetch failed");
                        AsyncState::failed(err.to_string())
                    }
                };

                let committed = tx_task.send_if_modified(|current| {
                    if gate.load(Ordering::SeqCst) == started {
                        *current = state;
                        true
                    } else {
                        false
                    }
                });

                // A suppressed commit means the subscription was stopped
                // while the fetch was in flight.
                if !committed {
                    break;
                }
            }
        });

        Self {
            generation,
            tx,
            task,
        }
    }

    /// Stop polling.
    ///
    /// The timer task is cancelled and any fetch still in flight is barred
    /// from committing. Dropping the handle has the same effect.
    pub fn stop(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.task.abort();
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T>> {
        self.tx.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> AsyncState<T> {
        self.tx.borrow().clone()
    }
}

impl<T> Drop for PollingSubscription<T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_runs_immediately() {
        let subscription = PollingSubscription::start(Duration::from_secs(30), || {
            futures::future::ready(Ok(1_u32)).boxed()
        });
        let mut rx = subscription.subscribe();

        while rx.borrow().is_loading {
            assert!(rx.changed().await.is_ok());
        }

        assert_eq!(subscription.state().data, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_commits_once_per_interval() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let subscription = PollingSubscription::start(Duration::from_secs(30), move || {
            let c = Arc::clone(&counter_clone);
            async move { Ok(c.fetch_add(1, Ordering::SeqCst)) }.boxed()
        });
        let mut rx = subscription.subscribe();

        while rx.borrow().is_loading {
            assert!(rx.changed().await.is_ok());
        }
        assert_eq!(subscription.state().data, Some(0));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(subscription.state().data, Some(1));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(subscription.state().data, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_commits() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let subscription = PollingSubscription::start(Duration::from_secs(30), move || {
            let c = Arc::clone(&counter_clone);
            async move { Ok(c.fetch_add(1, Ordering::SeqCst)) }.boxed()
        });
        let mut rx = subscription.subscribe();

        while rx.borrow().is_loading {
            assert!(rx.changed().await.is_ok());
        }

        subscription.stop();
        let stopped_at = subscription.state();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(subscription.state(), stopped_at);
    }
}
