//! CalculatePriceHandler - Query handler summing prices over a filter.

use std::sync::Arc;

use crate::domain::subscription::{SubscriptionError, SubscriptionFilter};
use crate::ports::SubscriptionRepository;

/// Query for the total price of matching subscriptions.
#[derive(Debug, Clone)]
pub struct CalculatePriceQuery {
    pub filter: SubscriptionFilter,
}

/// Total price and how many subscriptions contributed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatePriceResult {
    pub total: i64,
    pub matched: usize,
}

/// Handler for price aggregation.
pub struct CalculatePriceHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl CalculatePriceHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: CalculatePriceQuery,
    ) -> Result<CalculatePriceResult, SubscriptionError> {
        if query.filter.is_empty() {
            return Err(SubscriptionError::validation(
                "filter",
                "at least one of user_id, service_name, start_date, end_date is required",
            ));
        }

        let subscriptions = self.repository.list(Some(&query.filter)).await.map_err(|e| {
            tracing::error!(operation = "calculate_price", error = %e, "Error while calculating price");
            SubscriptionError::from(e)
        })?;

        let total = subscriptions
            .iter()
            .try_fold(0i64, |acc, s| acc.checked_add(s.price()))
            .ok_or_else(|| {
                SubscriptionError::validation(
                    "filter",
                    "total price of matching subscriptions exceeds the supported range",
                )
            })?;
        let result = CalculatePriceResult {
            total,
            matched: subscriptions.len(),
        };
        tracing::info!(total = result.total, matched = result.matched, "Price calculated");
        Ok(result)
    }
}
