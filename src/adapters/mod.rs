//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum REST endpoints
//! - `postgres` - PostgreSQL repository and its query builder
//! - `storage` - In-memory repository for tests and local runs

pub mod http;
pub mod postgres;
pub mod storage;

pub use http::{api_router, SubscriptionAppState};
pub use postgres::PostgresSubscriptionRepository;
pub use storage::InMemorySubscriptionRepository;
