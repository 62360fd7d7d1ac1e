//! # Eventdesk Binding
//!
//! Async view-state runtime for Eventdesk resources.
//!
//! This crate adapts the resource client to a rendering model: a binding
//! runs a fetch on creation and on every dependency-key change, publishes
//! `{data, is_loading, error}` snapshots on a watch channel, and suppresses
//! stale commits so a superseded fetch can never overwrite a newer result.
//!
//! ## Core Concepts
//!
//! - **[`AsyncState`]**: the `{data, is_loading, error}` snapshot a view
//!   renders from
//! - **[`ResourceBinding`]**: fetch-on-key-change with stale-commit
//!   suppression and a `reload()` retry affordance
//! - **[`PollingSubscription`]**: a cancellable start/stop handle repeating
//!   the same fetch-and-commit on a fixed interval
//!
//! ## Example
//!
//! ```ignore
//! use eventdesk_binding::ResourceBinding;
//!
//! let mut binding = ResourceBinding::new(event_id, fetch_event);
//! let mut states = binding.subscribe();
//!
//! while states.changed().await.is_ok() {
//!     render(&states.borrow());
//! }
//! ```

pub mod polling;
pub mod resource;
pub mod state;

// Re-export main types for convenience
pub use polling::PollingSubscription;
pub use resource::{Fetcher, ResourceBinding};
pub use state::AsyncState;
