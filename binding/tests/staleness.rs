//! Race and teardown tests for resource bindings and polling subscriptions.
//!
//! All tests run under paused virtual time, with scripted fetchers whose
//! delays force the interleavings under test: a superseded fetch resolving
//! after its successor, a detach racing an in-flight fetch, and a stopped
//! poll loop with a fetch mid-flight.

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use eventdesk_binding::{PollingSubscription, ResourceBinding};
use eventdesk_client::ApiError;
use eventdesk_testing::{CommitSpy, ScriptedFetcher};

/// Wait until the binding has left the loading state.
async fn settled<T: Clone + Send + Sync + 'static>(
    states: &mut tokio::sync::watch::Receiver<eventdesk_binding::AsyncState<T>>,
) {
    while states.borrow().is_loading {
        states
            .changed()
            .await
            .expect("state channel should stay open");
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_superseded_fetch_never_overwrites_newer_result() {
    eventdesk_testing::init_tracing();

    let script = ScriptedFetcher::new();
    // Fetch for the first key resolves late; fetch for the second key wins.
    script.push_ok(Duration::from_millis(50), "stale payload".to_owned());
    script.push_ok(Duration::from_millis(10), "fresh payload".to_owned());

    let mut binding = ResourceBinding::new("evt_1".to_owned(), script.fetcher());
    binding.set_key("evt_2".to_owned());

    let mut states = binding.subscribe();
    settled(&mut states).await;
    assert_eq!(binding.state().data.as_deref(), Some("fresh payload"));

    // Let the superseded fetch resolve; its result must be discarded.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(binding.state().data.as_deref(), Some("fresh payload"));
}

#[tokio::test(start_paused = true)]
async fn test_detach_suppresses_the_inflight_commit() {
    let script = ScriptedFetcher::new();
    script.push_ok(Duration::from_millis(10), 7_u32);

    let binding = ResourceBinding::new("evt_1".to_owned(), script.fetcher());
    let spy = CommitSpy::attach(binding.subscribe());

    binding.detach();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(spy.count(), 0);
    assert!(binding.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_drop_suppresses_the_inflight_commit() {
    let script = ScriptedFetcher::new();
    script.push_ok(Duration::from_millis(10), 7_u32);

    let binding = ResourceBinding::new("evt_1".to_owned(), script.fetcher());
    let states = binding.subscribe();
    let spy = CommitSpy::attach(states);

    drop(binding);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(spy.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reload_recovers_from_a_failed_fetch() {
    let script = ScriptedFetcher::new();
    script.push_err(Duration::ZERO, ApiError::from_status(500, None));
    script.push_ok(Duration::ZERO, "recovered".to_owned());

    let binding = ResourceBinding::new("evt_1".to_owned(), script.fetcher());
    let mut states = binding.subscribe();
    settled(&mut states).await;
    assert_eq!(binding.state().error.as_deref(), Some("Server error"));

    // The retry affordance re-runs the same fetch.
    binding.reload();
    settled(&mut states).await;
    assert_eq!(binding.state().data.as_deref(), Some("recovered"));
    assert_eq!(binding.state().error, None);
}

#[tokio::test(start_paused = true)]
async fn test_polling_commits_fresh_results_until_stopped() {
    let script = ScriptedFetcher::new();
    script.push_ok(Duration::ZERO, 1_u32);
    script.push_ok(Duration::ZERO, 2_u32);

    let subscription = PollingSubscription::start(Duration::from_secs(30), script.poll_fetcher());
    let mut states = subscription.subscribe();
    settled(&mut states).await;
    assert_eq!(subscription.state().data, Some(1));

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(subscription.state().data, Some(2));

    subscription.stop();
    let spy = CommitSpy::attach(subscription.subscribe());
    tokio::time::sleep(Duration::from_secs(120)).await;

    // No further ticks, no further commits.
    assert_eq!(spy.count(), 0);
    assert_eq!(subscription.state().data, Some(2));
}
