//! The full slice, end to end: a binding driving the resource client
//! against a mock backend.
//!
//! Validates that transient server errors are absorbed by the retry layer
//! and the view-state converges to loaded data, and that terminal errors
//! reach the view-state as the normalized message only.

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use eventdesk_binding::ResourceBinding;
use eventdesk_client::types::{Event, EventStatus};
use eventdesk_client::{ApiClient, ClientConfig, RetryPolicy};
use futures::FutureExt;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(server: &MockServer) -> Arc<ApiClient> {
    let config = ClientConfig::new(server.uri())
        .with_timeout(Duration::from_millis(500))
        .with_retry(
            RetryPolicy::new()
                .with_max_attempts(3)
                .with_base_delay(Duration::from_millis(10)),
        );
    Arc::new(ApiClient::new(config).expect("client construction should succeed"))
}

async fn settled(states: &mut tokio::sync::watch::Receiver<eventdesk_binding::AsyncState<Vec<Event>>>) {
    while states.borrow().is_loading {
        states
            .changed()
            .await
            .expect("state channel should stay open");
    }
}

#[tokio::test]
async fn test_view_state_converges_after_transient_server_errors() {
    let server = MockServer::start().await;

    // Two server errors, then a healthy response on the third attempt.
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "evt_1",
                "name": "RustConf",
                "status": "active",
                "startsAt": "2026-09-01T09:00:00Z",
                "location": "Portland",
                "capacity": 500,
                "ticketsSold": 342
            }],
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let binding = ResourceBinding::new(EventStatus::Active, move |status| {
        let client = Arc::clone(&client);
        async move {
            client
                .events()
                .list(Some(status))
                .await
                .map(|response| response.data)
        }
        .boxed()
    });

    let mut states = binding.subscribe();
    settled(&mut states).await;

    let state = binding.state();
    assert_eq!(state.error, None);
    assert!(!state.is_loading);
    let events = state.data.expect("data should be present");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "evt_1");
}

#[tokio::test]
async fn test_terminal_error_reaches_view_state_as_message_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(query_param("status", "draft"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Session expired" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let binding = ResourceBinding::new(EventStatus::Draft, move |status| {
        let client = Arc::clone(&client);
        async move {
            client
                .events()
                .list(Some(status))
                .await
                .map(|response| response.data)
        }
        .boxed()
    });

    let mut states = binding.subscribe();
    settled(&mut states).await;

    let state = binding.state();
    assert_eq!(state.data, None);
    assert_eq!(state.error.as_deref(), Some("Session expired"));
}
