//! Subscription entity.
//!
//! A subscription records that a user pays `price` (minor currency units)
//! for `service_name` from `start_date` on, optionally until `end_date`.
//! An absent end date means the subscription is open-ended.

use crate::domain::foundation::{MonthYear, SubscriptionId, ValidationError};

/// Subscription entity as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
    service_name: String,
    price: i64,
    user_id: String,
    start_date: MonthYear,
    end_date: Option<MonthYear>,
}

impl Subscription {
    /// Reconstitute a subscription from persistence (no validation).
    pub fn reconstitute(
        id: SubscriptionId,
        service_name: String,
        price: i64,
        user_id: String,
        start_date: MonthYear,
        end_date: Option<MonthYear>,
    ) -> Self {
        Self {
            id,
            service_name,
            price,
            user_id,
            start_date,
            end_date,
        }
    }

    /// Attach a store-assigned id to validated input.
    pub fn from_new(id: SubscriptionId, new: NewSubscription) -> Self {
        Self {
            id,
            service_name: new.service_name,
            price: new.price,
            user_id: new.user_id,
            start_date: new.start_date,
            end_date: new.end_date,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn start_date(&self) -> MonthYear {
        self.start_date
    }

    pub fn end_date(&self) -> Option<MonthYear> {
        self.end_date
    }

    /// Apply a patch in place. Only supplied fields change.
    ///
    /// Used by stores that cannot express the patch as SQL.
    pub fn apply(&mut self, patch: &super::SubscriptionPatch) {
        if let Some(user_id) = &patch.user_id {
            self.user_id = user_id.clone();
        }
        if let Some(service_name) = &patch.service_name {
            self.service_name = service_name.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        match patch.end_date {
            super::EndDateChange::Unchanged => {}
            super::EndDateChange::Clear => self.end_date = None,
            super::EndDateChange::SetTo(end_date) => self.end_date = Some(end_date),
        }
    }
}

/// Validated input for creating a subscription.
///
/// # Invariants
///
/// - `service_name` and `user_id` are non-empty
/// - `price` is not negative
/// - `end_date`, when present, does not precede `start_date`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    service_name: String,
    price: i64,
    user_id: String,
    start_date: MonthYear,
    end_date: Option<MonthYear>,
}

impl NewSubscription {
    /// Validate and build creation input.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `service_name` or `user_id` is blank
    /// - `Negative` if `price` is below zero
    /// - `OutOfOrder` if `end_date` precedes `start_date`
    pub fn new(
        service_name: impl Into<String>,
        price: i64,
        user_id: impl Into<String>,
        start_date: MonthYear,
        end_date: Option<MonthYear>,
    ) -> Result<Self, ValidationError> {
        let service_name = service_name.into();
        let user_id = user_id.into();

        if service_name.trim().is_empty() {
            return Err(ValidationError::empty_field("service_name"));
        }
        if user_id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if price < 0 {
            return Err(ValidationError::negative("price", price));
        }
        if let Some(end) = end_date {
            if end < start_date {
                return Err(ValidationError::out_of_order("end_date", "start_date"));
            }
        }

        Ok(Self {
            service_name,
            price,
            user_id,
            start_date,
            end_date,
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn start_date(&self) -> MonthYear {
        self.start_date
    }

    pub fn end_date(&self) -> Option<MonthYear> {
        self.end_date
    }
}
