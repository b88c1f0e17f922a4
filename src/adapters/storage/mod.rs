//! Storage adapters that do not need an external database.

mod in_memory_subscription_repository;

pub use in_memory_subscription_repository::InMemorySubscriptionRepository;
