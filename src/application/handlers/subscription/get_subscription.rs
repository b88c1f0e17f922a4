//! GetSubscriptionHandler - Query handler for retrieving one subscription.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Query to get a subscription by ID.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub id: SubscriptionId,
}

/// Handler for retrieving subscription details.
pub struct GetSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl GetSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSubscriptionQuery) -> Result<Subscription, SubscriptionError> {
        self.repository
            .get(query.id)
            .await
            .map_err(|e| SubscriptionError::from_repository(query.id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::testing::{
        new_subscription, CountingRepository, FailingRepository,
    };

    #[tokio::test]
    async fn returns_existing_subscription() {
        let repo = Arc::new(CountingRepository::default());
        let created = repo.inner.create(&new_subscription("u1", "Netflix", 100)).await.unwrap();
        let handler = GetSubscriptionHandler::new(repo);

        let found = handler.handle(GetSubscriptionQuery { id: created.id() }).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn returns_not_found_when_subscription_does_not_exist() {
        let handler = GetSubscriptionHandler::new(Arc::new(CountingRepository::default()));
        let id = SubscriptionId::new(77);

        let result = handler.handle(GetSubscriptionQuery { id }).await;
        assert_eq!(result, Err(SubscriptionError::NotFound(id)));
    }

    #[tokio::test]
    async fn store_failure_is_not_reported_as_not_found() {
        let handler = GetSubscriptionHandler::new(Arc::new(FailingRepository));
        let result = handler
            .handle(GetSubscriptionQuery {
                id: SubscriptionId::new(1),
            })
            .await;
        assert!(matches!(result, Err(SubscriptionError::Infrastructure(_))));
    }
}
