//! Subscription repository port.
//!
//! Defines the contract for persisting and querying subscriptions.
//! Implementations handle the actual storage operations.
//!
//! # Error contract
//!
//! A missing row is reported as `ErrorCode::SubscriptionNotFound`
//! (see [`DomainError::is_not_found`]). Every other storage failure is
//! `ErrorCode::DatabaseError` and is treated as unexpected by callers.

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::subscription::{
    NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch,
};
use async_trait::async_trait;

/// Repository port for subscription persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a subscription and return it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError>;

    /// Fetch a subscription by id.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if no row has this id
    /// - `DatabaseError` on query failure
    async fn get(&self, id: SubscriptionId) -> Result<Subscription, DomainError>;

    /// Change the supplied fields of one subscription.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the patch supplies no field
    /// - `SubscriptionNotFound` if no row was affected
    /// - `DatabaseError` on persistence failure
    async fn update(&self, id: SubscriptionId, patch: &SubscriptionPatch)
        -> Result<(), DomainError>;

    /// Remove a subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if no row was affected
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: SubscriptionId) -> Result<(), DomainError>;

    /// List subscriptions matching the filter, or all of them for `None`.
    ///
    /// Order is whatever the store yields.
    async fn list(
        &self,
        filter: Option<&SubscriptionFilter>,
    ) -> Result<Vec<Subscription>, DomainError>;
}
