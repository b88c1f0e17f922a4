//! DeleteSubscriptionHandler - Command handler for removing subscriptions.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

/// Command to delete a subscription.
#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub id: SubscriptionId,
}

/// Handler for deleting subscriptions.
pub struct DeleteSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl DeleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteSubscriptionCommand) -> Result<(), SubscriptionError> {
        self.repository
            .delete(cmd.id)
            .await
            .map_err(|e| SubscriptionError::from_repository(cmd.id, e))?;

        tracing::info!(id = %cmd.id, "Subscription deleted");
        Ok(())
    }
}
