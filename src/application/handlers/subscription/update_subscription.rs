//! UpdateSubscriptionHandler - Command handler for partial updates.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{SubscriptionError, SubscriptionPatch};
use crate::ports::SubscriptionRepository;

/// Command to change some fields of a subscription.
#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub id: SubscriptionId,
    pub patch: SubscriptionPatch,
}

/// Handler for partial subscription updates.
pub struct UpdateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl UpdateSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateSubscriptionCommand) -> Result<(), SubscriptionError> {
        // An empty patch would render `SET WHERE`; stop before any SQL exists.
        if cmd.patch.is_empty() {
            return Err(SubscriptionError::validation(
                "patch",
                "at least one of service_name, price, user_id, start_date, end_date is required",
            ));
        }
        cmd.patch.validate()?;

        self.repository
            .update(cmd.id, &cmd.patch)
            .await
            .map_err(|e| SubscriptionError::from_repository(cmd.id, e))?;

        tracing::info!(id = %cmd.id, "Subscription updated");
        Ok(())
    }
}
