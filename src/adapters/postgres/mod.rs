//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSubscriptionRepository` - Subscription persistence
//! - `query` - Dynamic SQL for partial updates and filtered selects

pub mod query;
mod subscription_repository;

pub use subscription_repository::PostgresSubscriptionRepository;
