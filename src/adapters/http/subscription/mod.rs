//! HTTP adapter for the subscription module.
//!
//! # Endpoints
//!
//! - `POST /api/subscriptions` - Create a subscription
//! - `GET /api/subscriptions` - List subscriptions, optionally filtered
//! - `POST /api/subscriptions/calc` - Total price over a filter
//! - `GET /api/subscriptions/{id}` - Read one subscription
//! - `PATCH /api/subscriptions/{id}` - Partial update (`end_date: "0"` clears it)
//! - `DELETE /api/subscriptions/{id}` - Delete a subscription

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::{SubscriptionApiError, SubscriptionAppState};
pub use routes::subscription_router;
