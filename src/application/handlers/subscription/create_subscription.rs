//! CreateSubscriptionHandler - Command handler for creating subscriptions.

use std::sync::Arc;

use crate::domain::foundation::MonthYear;
use crate::domain::subscription::{NewSubscription, Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Command to create a new subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
}

/// Handler for creating subscriptions.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl CreateSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let new = NewSubscription::new(
            cmd.service_name,
            cmd.price,
            cmd.user_id,
            cmd.start_date,
            cmd.end_date,
        )?;

        let created = self.repository.create(&new).await?;
        tracing::info!(id = %created.id(), "Subscription created");
        Ok(created)
    }
}
