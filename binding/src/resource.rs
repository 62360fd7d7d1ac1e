//! Dependency-keyed resource bindings with stale-commit suppression.
//!
//! A [`ResourceBinding`] owns one [`AsyncState`] published on a watch
//! channel. It fetches on construction and on every dependency-key change,
//! and guarantees that only the most recently issued fetch may commit:
//! every fetch snapshots a generation counter at start and checks it at
//! commit time, so a slow, superseded response can never overwrite a newer
//! result, and nothing mutates state after the binding is detached.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventdesk_client::ApiError;
use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::state::AsyncState;

/// Fetch function driven by a [`ResourceBinding`].
pub type Fetcher<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// A view binding over one asynchronous resource.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ApiClient::new(config)?);
/// let mut binding = ResourceBinding::new("evt_1".to_owned(), move |event_id| {
///     let client = Arc::clone(&client);
///     Box::pin(async move { client.events().get(&event_id).await.map(|r| r.data) })
/// });
///
/// let mut states = binding.subscribe();
/// // ... render on each change; switch events with binding.set_key(...)
/// ```
pub struct ResourceBinding<K, T> {
    fetcher: Fetcher<K, T>,
    key: K,
    generation: Arc<AtomicU64>,
    tx: Arc<watch::Sender<AsyncState<T>>>,
}

impl<K, T> ResourceBinding<K, T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create a binding for `key` and start its first fetch.
    ///
    /// Must be called from within a Tokio runtime; the fetch runs as a
    /// spawned task.
    pub fn new<F>(key: K, fetcher: F) -> Self
    where
        F: Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        let (tx, _rx) = watch::channel(AsyncState::loading());
        let binding = Self {
            fetcher: Arc::new(fetcher),
            key,
            generation: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
        };
        binding.restart();
        binding
    }

    /// Change the dependency key.
    ///
    /// A no-op when the key is unchanged; otherwise the state resets to
    /// loading and a new fetch starts. Any fetch still in flight for the
    /// previous key is superseded and its result discarded.
    pub fn set_key(&mut self, key: K) {
        if key == self.key {
            return;
        }
        self.key = key;
        self.restart();
    }

    /// Re-run the fetch for the current key (the retry affordance).
    pub fn reload(&self) {
        self.restart();
    }

    /// Detach the binding: no in-flight fetch may mutate state afterwards.
    ///
    /// Cooperative cancellation -- the in-flight request itself is not
    /// aborted, only its commit is suppressed. Dropping the binding has the
    /// same effect.
    pub fn detach(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
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

    /// The current dependency key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    fn restart(&self) {
        // Invalidate any in-flight fetch before publishing the loading
        // state, so nothing issued earlier can win against this fetch.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(AsyncState::loading());

        let future = (self.fetcher)(self.key.clone());
        let gate = Arc::clone(&self.generation);
        let tx = Arc::clone(&self.tx);

        tokio::spawn(async move {
            let state = match future.await {
                Ok(data) => AsyncState::loaded(data),
                Err(err) => {
                    tracing::debug!(error = %err, "resource fetch failed");
                    AsyncState::failed(err.to_string())
                }
            };

            let committed = tx.send_if_modified(|current| {
                if gate.load(Ordering::SeqCst) == generation {
                    *current = state;
                    true
                } else {
                    false
                }
            });

            if !committed {
                tracing::trace!(generation, "stale fetch result discarded");
            }
        });
    }
}

impl<K, T> Drop for ResourceBinding<K, T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
