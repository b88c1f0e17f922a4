//! Subscription command and query handlers.

mod calculate_price;
mod create_subscription;
mod delete_subscription;
mod get_subscription;
mod list_subscriptions;
mod update_subscription;

pub use calculate_price::{CalculatePriceHandler, CalculatePriceQuery, CalculatePriceResult};
pub use create_subscription::{CreateSubscriptionCommand, CreateSubscriptionHandler};
pub use delete_subscription::{DeleteSubscriptionCommand, DeleteSubscriptionHandler};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use list_subscriptions::{ListSubscriptionsHandler, ListSubscriptionsQuery};
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};
