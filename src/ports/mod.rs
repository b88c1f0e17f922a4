//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionRepository` - Persistence of subscription records

mod subscription_repository;

pub use subscription_repository::SubscriptionRepository;
