//! In-Memory Subscription Repository
//!
//! Keeps subscriptions in insertion order behind a lock.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};
use crate::domain::subscription::{
    NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch,
};
use crate::ports::SubscriptionRepository;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Subscription>,
    last_id: i64,
}

/// In-memory storage for subscriptions
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemorySubscriptionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: SubscriptionId) -> DomainError {
    DomainError::new(
        ErrorCode::SubscriptionNotFound,
        format!("Subscription not found: {}", id),
    )
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let created = Subscription::from_new(SubscriptionId::new(table.last_id), subscription.clone());
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn get(&self, id: SubscriptionId) -> Result<Subscription, DomainError> {
        let table = self.table.read().await;
        table
            .rows
            .iter()
            .find(|s| s.id() == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update(
        &self,
        id: SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation("patch", "nothing to update"));
        }

        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;
        row.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: SubscriptionId) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        let position = table
            .rows
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;
        table.rows.remove(position);
        Ok(())
    }

    async fn list(
        &self,
        filter: Option<&SubscriptionFilter>,
    ) -> Result<Vec<Subscription>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|s| filter.map_or(true, |f| f.matches(s)))
            .cloned()
            .collect())
    }
}
