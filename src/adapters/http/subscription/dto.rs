//! HTTP DTOs (Data Transfer Objects) for subscription endpoints.
//!
//! These types define the JSON request/response structure for the subscription
//! API. Dates cross the wire as `MM-YYYY` strings and are parsed here, at the
//! boundary, into `MonthYear`.

use serde::{Deserialize, Serialize};

use crate::application::CreateSubscriptionCommand;
use crate::domain::foundation::{MonthYear, SubscriptionId, ValidationError};
use crate::domain::subscription::{
    EndDateChange, Subscription, SubscriptionFilter, SubscriptionPatch, CLEAR_END_DATE,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionRequest {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    /// `MM-YYYY`, or `"0"` / absent for an open-ended subscription.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl CreateSubscriptionRequest {
    pub fn into_command(self) -> Result<CreateSubscriptionCommand, ValidationError> {
        let start_date = match date_field(self.start_date) {
            Some(raw) => MonthYear::parse_field("start_date", &raw)?,
            None => return Err(ValidationError::empty_field("start_date")),
        };
        let end_date = match date_field(self.end_date) {
            Some(raw) if raw == CLEAR_END_DATE => None,
            Some(raw) => Some(MonthYear::parse_field("end_date", &raw)?),
            None => None,
        };

        Ok(CreateSubscriptionCommand {
            service_name: self.service_name,
            price: self.price,
            user_id: self.user_id,
            start_date,
            end_date,
        })
    }
}

/// Partial update. Absent and empty fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriptionRequest {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    /// `"0"` clears the end date.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl UpdateSubscriptionRequest {
    pub fn into_patch(self) -> Result<SubscriptionPatch, ValidationError> {
        let start_date = date_field(self.start_date)
            .map(|raw| MonthYear::parse_field("start_date", &raw))
            .transpose()?;

        Ok(SubscriptionPatch {
            service_name: non_empty(self.service_name),
            price: self.price,
            user_id: non_empty(self.user_id),
            start_date,
            end_date: EndDateChange::from_wire(self.end_date.as_deref())?,
        })
    }
}

/// Filter accepted by `GET /subscriptions` (query string) and `POST /subscriptions/calc` (body).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionFilterRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl SubscriptionFilterRequest {
    pub fn into_filter(self) -> Result<SubscriptionFilter, ValidationError> {
        let start_date = date_field(self.start_date)
            .map(|raw| MonthYear::parse_field("start_date", &raw))
            .transpose()?;
        let end_date = date_field(self.end_date)
            .map(|raw| MonthYear::parse_field("end_date", &raw))
            .transpose()?;

        Ok(SubscriptionFilter {
            user_id: non_empty(self.user_id),
            service_name: non_empty(self.service_name),
            start_date,
            end_date,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Dates ignore surrounding whitespace, as `EndDateChange::from_wire` does.
fn date_field(value: Option<String>) -> Option<String> {
    non_empty(value.map(|v| v.trim().to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A subscription as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionResponse {
    pub id: SubscriptionId,
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: MonthYear,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthYear>,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.id(),
            service_name: s.service_name().to_string(),
            price: s.price(),
            user_id: s.user_id().to_string(),
            start_date: s.start_date(),
            end_date: s.end_date(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: SubscriptionId,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub price: i64,
}

/// Error body. Only a human readable message is exposed.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
