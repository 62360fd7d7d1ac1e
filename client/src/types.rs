//! Core wire types for the Eventdesk platform API.
//!
//! The backend speaks camelCase JSON; every type here mirrors one resource
//! of the REST surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an event.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Created but not yet published
    Draft,
    /// Published and selling tickets
    Active,
    /// Past its end date
    Completed,
    /// Cancelled by the organizer
    Cancelled,
}

impl EventStatus {
    /// Wire form of the status, as used in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// An event listed on the platform.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifecycle status
    pub status: EventStatus,
    /// When the event starts
    pub starts_at: DateTime<Utc>,
    /// Venue or address, if announced
    pub location: Option<String>,
    /// Maximum attendee count, if capped
    pub capacity: Option<u32>,
    /// Tickets sold so far
    pub tickets_sold: u32,
}

/// A registered participant of an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Unique identifier
    pub id: String,
    /// Event the participant is registered for
    pub event_id: String,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Name of the ticket type purchased, if any
    pub ticket_type: Option<String>,
    /// Whether the participant has been checked in
    pub checked_in: bool,
    /// When the check-in happened
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Outcome of a check-in operation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResult {
    /// Participant that was checked in
    pub participant_id: String,
    /// Whether the participant is now checked in
    pub checked_in: bool,
    /// When the check-in was recorded
    pub checked_in_at: DateTime<Utc>,
}

/// Payment status of an order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, payment outstanding
    Pending,
    /// Payment settled
    Paid,
    /// Fully refunded
    Refunded,
    /// Cancelled before payment
    Cancelled,
}

/// A ticket order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier
    pub id: String,
    /// Event the order belongs to
    pub event_id: String,
    /// Name of the purchaser
    pub purchaser_name: String,
    /// Email of the purchaser
    pub purchaser_email: String,
    /// Order total in minor currency units
    pub total_cents: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Payment status
    pub status: OrderStatus,
    /// When the order was placed
    pub placed_at: DateTime<Utc>,
}

/// Aggregated metrics for one event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventMetrics {
    /// Event the metrics describe
    pub event_id: String,
    /// Tickets sold
    pub tickets_sold: u32,
    /// Gross revenue in minor currency units
    pub revenue_cents: i64,
    /// Participants checked in
    pub check_ins: u32,
    /// Event page views
    pub page_views: u64,
}

/// Kind of entry in the live activity feed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A new order was placed
    OrderPlaced,
    /// A participant was checked in
    CheckIn,
    /// An order was refunded
    Refund,
    /// A coupon was redeemed at checkout
    CouponRedeemed,
}

/// One entry of an event's live activity feed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Unique identifier
    pub id: String,
    /// Event the activity belongs to
    pub event_id: String,
    /// Kind of activity
    pub kind: ActivityKind,
    /// Human-readable description
    pub description: String,
    /// When the activity occurred
    pub occurred_at: DateTime<Utc>,
}

/// A purchasable ticket type of an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Unique identifier
    pub id: String,
    /// Event the ticket type belongs to
    pub event_id: String,
    /// Display name
    pub name: String,
    /// Price in minor currency units
    pub price_cents: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Total quantity available
    pub quantity: u32,
    /// Quantity sold so far
    pub sold: u32,
    /// When sales open, if scheduled
    pub sales_start: Option<DateTime<Utc>>,
    /// When sales close, if scheduled
    pub sales_end: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a ticket type.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeDraft {
    /// Display name
    pub name: String,
    /// Price in minor currency units
    pub price_cents: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Total quantity available
    pub quantity: u32,
    /// When sales open, if scheduled
    pub sales_start: Option<DateTime<Utc>>,
    /// When sales close, if scheduled
    pub sales_end: Option<DateTime<Utc>>,
}

/// Discount attached to a coupon.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "discountType", content = "amount", rename_all = "lowercase")]
pub enum Discount {
    /// Percentage off the order total (0-100)
    Percentage(u8),
    /// Fixed amount off, in minor currency units
    Fixed(i64),
}

/// A discount coupon.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique identifier
    pub id: String,
    /// Event the coupon applies to
    pub event_id: String,
    /// Code entered at checkout
    pub code: String,
    /// Discount granted
    #[serde(flatten)]
    pub discount: Discount,
    /// Maximum number of redemptions, if capped
    pub max_uses: Option<u32>,
    /// Redemptions so far
    pub uses: u32,
    /// Expiry, if scheduled
    pub expires_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a coupon.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    /// Code entered at checkout
    pub code: String,
    /// Discount granted
    #[serde(flatten)]
    pub discount: Discount,
    /// Maximum number of redemptions, if capped
    pub max_uses: Option<u32>,
    /// Expiry, if scheduled
    pub expires_at: Option<DateTime<Utc>>,
}

/// Input kind of a checkout form field.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text input
    Text,
    /// Email address input
    Email,
    /// Phone number input
    Phone,
    /// Single choice from a list of options
    Select,
    /// Boolean checkbox
    Checkbox,
}

/// A field of the checkout form builder.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique identifier
    pub id: String,
    /// Label shown to the purchaser
    pub label: String,
    /// Input kind
    pub kind: FieldKind,
    /// Whether the field must be filled in
    pub required: bool,
    /// Options for [`FieldKind::Select`] fields, empty otherwise
    #[serde(default)]
    pub options: Vec<String>,
    /// Zero-based position in the form
    pub position: u32,
}

/// One reorderable section of the checkout flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSection {
    /// Stable section identifier (e.g. `tickets`, `attendees`, `payment`)
    pub id: String,
    /// Heading shown to the purchaser
    pub title: String,
    /// Zero-based position in the flow
    pub position: u32,
    /// Whether the section is shown at all
    pub visible: bool,
}

/// Checkout configuration of one event: section order and visibility.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// Event the configuration belongs to
    pub event_id: String,
    /// Sections in display order
    pub sections: Vec<CheckoutSection>,
}
