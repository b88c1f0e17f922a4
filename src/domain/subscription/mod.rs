//! Subscription domain module.
//!
//! The subscription entity, its validated creation input, and the sparse
//! patch and filter shapes used for partial updates and queries.

mod aggregate;
mod errors;
mod filter;
mod patch;

pub use aggregate::{NewSubscription, Subscription};
pub use errors::SubscriptionError;
pub use filter::SubscriptionFilter;
pub use patch::{EndDateChange, SubscriptionPatch, CLEAR_END_DATE};
