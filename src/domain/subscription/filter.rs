//! Sparse filter for list and price queries.

use crate::domain::foundation::MonthYear;

use super::Subscription;

/// Constraints on listed subscriptions. Every supplied field must match.
///
/// - `user_id`, `service_name`: exact match
/// - `start_date`: subscription starts in or after this month
/// - `end_date`: subscription ends in or before this month; open-ended
///   subscriptions never match a supplied end date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<MonthYear>,
}

impl SubscriptionFilter {
    /// Filter on a single user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    /// True when no constraint is supplied.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.service_name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Evaluates the filter in memory with the same semantics as the SQL form.
    pub fn matches(&self, subscription: &Subscription) -> bool {
        if let Some(user_id) = &self.user_id {
            if subscription.user_id() != user_id {
                return false;
            }
        }
        if let Some(service_name) = &self.service_name {
            if subscription.service_name() != service_name {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if subscription.start_date() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            match subscription.end_date() {
                Some(sub_end) if sub_end <= end => {}
                _ => return false,
            }
        }
        true
    }
}
