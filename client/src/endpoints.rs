//! Typed endpoint surface over the resource client.
//!
//! One accessor per platform resource; each method maps to one REST call
//! and returns the uniform envelope. Paths are the platform's conventional
//! `/api/...` resource paths, parameterized by event ID where applicable.

use serde_json::json;

use crate::client::{ApiClient, ApiResponse};
use crate::error::ApiError;
use crate::types::{
    ActivityEntry, CheckinResult, CheckoutConfig, Coupon, CouponDraft, Event, EventMetrics,
    EventStatus, FormField, Order, Participant, TicketType, TicketTypeDraft,
};

impl ApiClient {
    /// Access the events resource.
    #[must_use]
    pub const fn events(&self) -> EventsApi<'_> {
        EventsApi { api: self }
    }

    /// Access the participants resource.
    #[must_use]
    pub const fn participants(&self) -> ParticipantsApi<'_> {
        ParticipantsApi { api: self }
    }

    /// Access the orders resource.
    #[must_use]
    pub const fn orders(&self) -> OrdersApi<'_> {
        OrdersApi { api: self }
    }

    /// Access per-event metrics.
    #[must_use]
    pub const fn metrics(&self) -> MetricsApi<'_> {
        MetricsApi { api: self }
    }

    /// Access the live activity feed.
    #[must_use]
    pub const fn activities(&self) -> ActivitiesApi<'_> {
        ActivitiesApi { api: self }
    }

    /// Access the ticket types resource.
    #[must_use]
    pub const fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi { api: self }
    }

    /// Access the coupons resource.
    #[must_use]
    pub const fn coupons(&self) -> CouponsApi<'_> {
        CouponsApi { api: self }
    }

    /// Access the checkout builder resource.
    #[must_use]
    pub const fn checkout(&self) -> CheckoutApi<'_> {
        CheckoutApi { api: self }
    }
}

/// Operations on events.
#[derive(Debug, Clone, Copy)]
pub struct EventsApi<'a> {
    api: &'a ApiClient,
}

impl EventsApi<'_> {
    /// List events, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn list(
        &self,
        status: Option<EventStatus>,
    ) -> Result<ApiResponse<Vec<Event>>, ApiError> {
        match status {
            Some(status) => {
                self.api
                    .get_with_query("/api/events", &[("status", status.as_str())])
                    .await
            }
            None => self.api.get("/api/events").await,
        }
    }

    /// Fetch a single event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn get(&self, event_id: &str) -> Result<ApiResponse<Event>, ApiError> {
        self.api.get(&format!("/api/events/{event_id}")).await
    }
}

/// Operations on participants of an event.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantsApi<'a> {
    api: &'a ApiClient,
}

impl ParticipantsApi<'_> {
    /// List all participants of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn list(&self, event_id: &str) -> Result<ApiResponse<Vec<Participant>>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/participants"))
            .await
    }

    /// Search participants of an event by name or email.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn search(
        &self,
        event_id: &str,
        query: &str,
    ) -> Result<ApiResponse<Vec<Participant>>, ApiError> {
        self.api
            .get_with_query(
                &format!("/api/events/{event_id}/participants/search"),
                &[("q", query)],
            )
            .await
    }

    /// Check a participant in.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn check_in(
        &self,
        event_id: &str,
        participant_id: &str,
    ) -> Result<ApiResponse<CheckinResult>, ApiError> {
        self.api
            .post(
                &format!("/api/events/{event_id}/participants/{participant_id}/check-in"),
                &json!({}),
            )
            .await
    }
}

/// Operations on ticket orders.
#[derive(Debug, Clone, Copy)]
pub struct OrdersApi<'a> {
    api: &'a ApiClient,
}

impl OrdersApi<'_> {
    /// List all orders of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn list(&self, event_id: &str) -> Result<ApiResponse<Vec<Order>>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/orders"))
            .await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn get(&self, order_id: &str) -> Result<ApiResponse<Order>, ApiError> {
        self.api.get(&format!("/api/orders/{order_id}")).await
    }
}

/// Aggregated per-event metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricsApi<'a> {
    api: &'a ApiClient,
}

impl MetricsApi<'_> {
    /// Fetch the metrics of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn event_metrics(&self, event_id: &str) -> Result<ApiResponse<EventMetrics>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/metrics"))
            .await
    }
}

/// The live activity feed, consumed by polling subscriptions.
#[derive(Debug, Clone, Copy)]
pub struct ActivitiesApi<'a> {
    api: &'a ApiClient,
}

impl ActivitiesApi<'_> {
    /// Fetch the most recent activity entries of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn recent(&self, event_id: &str) -> Result<ApiResponse<Vec<ActivityEntry>>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/activities"))
            .await
    }
}

/// Operations on ticket types.
#[derive(Debug, Clone, Copy)]
pub struct TicketsApi<'a> {
    api: &'a ApiClient,
}

impl TicketsApi<'_> {
    /// List the ticket types of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn list(&self, event_id: &str) -> Result<ApiResponse<Vec<TicketType>>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/tickets"))
            .await
    }

    /// Create a ticket type for an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn create(
        &self,
        event_id: &str,
        draft: &TicketTypeDraft,
    ) -> Result<ApiResponse<TicketType>, ApiError> {
        self.api
            .post(&format!("/api/events/{event_id}/tickets"), draft)
            .await
    }

    /// Update a ticket type.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn update(
        &self,
        ticket_id: &str,
        draft: &TicketTypeDraft,
    ) -> Result<ApiResponse<TicketType>, ApiError> {
        self.api
            .put(&format!("/api/tickets/{ticket_id}"), draft)
            .await
    }

    /// Delete a ticket type.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn delete(&self, ticket_id: &str) -> Result<(), ApiError> {
        self.api
            .delete::<serde_json::Value>(&format!("/api/tickets/{ticket_id}"))
            .await
            .map(|_| ())
    }
}

/// Operations on coupons.
#[derive(Debug, Clone, Copy)]
pub struct CouponsApi<'a> {
    api: &'a ApiClient,
}

impl CouponsApi<'_> {
    /// List the coupons of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn list(&self, event_id: &str) -> Result<ApiResponse<Vec<Coupon>>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/coupons"))
            .await
    }

    /// Create a coupon for an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn create(
        &self,
        event_id: &str,
        draft: &CouponDraft,
    ) -> Result<ApiResponse<Coupon>, ApiError> {
        self.api
            .post(&format!("/api/events/{event_id}/coupons"), draft)
            .await
    }

    /// Update a coupon.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn update(
        &self,
        coupon_id: &str,
        draft: &CouponDraft,
    ) -> Result<ApiResponse<Coupon>, ApiError> {
        self.api
            .put(&format!("/api/coupons/{coupon_id}"), draft)
            .await
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn delete(&self, coupon_id: &str) -> Result<(), ApiError> {
        self.api
            .delete::<serde_json::Value>(&format!("/api/coupons/{coupon_id}"))
            .await
            .map(|_| ())
    }
}

/// The checkout builder: form fields plus section order and visibility.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutApi<'a> {
    api: &'a ApiClient,
}

impl CheckoutApi<'_> {
    /// Fetch the checkout form fields of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn form_fields(&self, event_id: &str) -> Result<ApiResponse<Vec<FormField>>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/checkout/fields"))
            .await
    }

    /// Replace the checkout form fields of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn save_form_fields(
        &self,
        event_id: &str,
        fields: &[FormField],
    ) -> Result<ApiResponse<Vec<FormField>>, ApiError> {
        self.api
            .put(&format!("/api/events/{event_id}/checkout/fields"), fields)
            .await
    }

    /// Fetch the checkout configuration of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn configuration(
        &self,
        event_id: &str,
    ) -> Result<ApiResponse<CheckoutConfig>, ApiError> {
        self.api
            .get(&format!("/api/events/{event_id}/checkout/configuration"))
            .await
    }

    /// Replace the checkout configuration of an event.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the call.
    pub async fn update_configuration(
        &self,
        event_id: &str,
        config: &CheckoutConfig,
    ) -> Result<ApiResponse<CheckoutConfig>, ApiError> {
        self.api
            .put(
                &format!("/api/events/{event_id}/checkout/configuration"),
                config,
            )
            .await
    }
}
