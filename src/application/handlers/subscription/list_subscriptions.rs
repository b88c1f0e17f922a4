//! ListSubscriptionsHandler - Query handler for listing subscriptions.

use std::sync::Arc;

use crate::domain::subscription::{Subscription, SubscriptionError, SubscriptionFilter};
use crate::ports::SubscriptionRepository;

/// Query to list subscriptions, optionally filtered.
#[derive(Debug, Clone, Default)]
pub struct ListSubscriptionsQuery {
    pub filter: Option<SubscriptionFilter>,
}

/// Handler for listing subscriptions.
pub struct ListSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl ListSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListSubscriptionsQuery,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        let filter = query.filter.filter(|f| !f.is_empty());
        let subscriptions = self.repository.list(filter.as_ref()).await?;
        tracing::debug!(count = subscriptions.len(), "Subscriptions listed");
        Ok(subscriptions)
    }
}
