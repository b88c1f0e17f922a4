//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod subscription;

pub use subscription::{
    CalculatePriceHandler, CalculatePriceQuery, CalculatePriceResult,
    CreateSubscriptionCommand, CreateSubscriptionHandler,
    DeleteSubscriptionCommand, DeleteSubscriptionHandler,
    GetSubscriptionHandler, GetSubscriptionQuery,
    ListSubscriptionsHandler, ListSubscriptionsQuery,
    UpdateSubscriptionCommand, UpdateSubscriptionHandler,
};
