//! HTTP handlers for subscription endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. Request bodies are decoded leniently and every rejection is
//! reported as 400 with a `{"message"}` body.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    CalculatePriceHandler, CalculatePriceQuery, CreateSubscriptionHandler,
    DeleteSubscriptionCommand, DeleteSubscriptionHandler, GetSubscriptionHandler,
    GetSubscriptionQuery, ListSubscriptionsHandler, ListSubscriptionsQuery,
    UpdateSubscriptionCommand, UpdateSubscriptionHandler,
};
use crate::domain::foundation::{SubscriptionId, ValidationError};
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

use super::dto::{
    CreateSubscriptionRequest, CreatedResponse, ErrorResponse, PriceResponse,
    SubscriptionFilterRequest, SubscriptionResponse, UpdateSubscriptionRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub repository: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionAppState {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(self.repository.clone())
    }

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.repository.clone())
    }

    pub fn update_subscription_handler(&self) -> UpdateSubscriptionHandler {
        UpdateSubscriptionHandler::new(self.repository.clone())
    }

    pub fn delete_subscription_handler(&self) -> DeleteSubscriptionHandler {
        DeleteSubscriptionHandler::new(self.repository.clone())
    }

    pub fn list_subscriptions_handler(&self) -> ListSubscriptionsHandler {
        ListSubscriptionsHandler::new(self.repository.clone())
    }

    pub fn calculate_price_handler(&self) -> CalculatePriceHandler {
        CalculatePriceHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/subscriptions - Create a subscription
pub async fn create_subscription(
    State(state): State<SubscriptionAppState>,
    body: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SubscriptionApiError> {
    const OP: &str = "create_subscription";

    let Json(request) = body.map_err(|e| SubscriptionApiError::rejected(OP, e.body_text()))?;
    let cmd = request.into_command().map_err(|e| SubscriptionApiError::invalid(OP, e))?;

    let created = state
        .create_subscription_handler()
        .handle(cmd)
        .await
        .map_err(|e| SubscriptionApiError::failed(OP, e))?;

    let response = CreatedResponse { id: created.id() };
    Ok((StatusCode::CREATED, Json(response)))
}

/// PATCH /api/subscriptions/:id - Change some fields of a subscription
pub async fn update_subscription(
    State(state): State<SubscriptionAppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
) -> Result<StatusCode, SubscriptionApiError> {
    const OP: &str = "update_subscription";

    let id = parse_id(OP, &raw_id)?;
    let Json(request) = body.map_err(|e| SubscriptionApiError::rejected(OP, e.body_text()))?;
    let patch = request.into_patch().map_err(|e| SubscriptionApiError::invalid(OP, e))?;

    state
        .update_subscription_handler()
        .handle(UpdateSubscriptionCommand { id, patch })
        .await
        .map_err(|e| SubscriptionApiError::failed(OP, e))?;

    Ok(StatusCode::OK)
}

/// DELETE /api/subscriptions/:id - Delete a subscription
pub async fn delete_subscription(
    State(state): State<SubscriptionAppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, SubscriptionApiError> {
    const OP: &str = "delete_subscription";

    let id = parse_id(OP, &raw_id)?;
    state
        .delete_subscription_handler()
        .handle(DeleteSubscriptionCommand { id })
        .await
        .map_err(|e| SubscriptionApiError::failed(OP, e))?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/subscriptions/:id - Read one subscription
pub async fn get_subscription(
    State(state): State<SubscriptionAppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<SubscriptionResponse>, SubscriptionApiError> {
    const OP: &str = "get_subscription";

    let id = parse_id(OP, &raw_id)?;
    let subscription = state
        .get_subscription_handler()
        .handle(GetSubscriptionQuery { id })
        .await
        .map_err(|e| SubscriptionApiError::failed(OP, e))?;

    Ok(Json(SubscriptionResponse::from(&subscription)))
}

/// GET /api/subscriptions - List subscriptions, optionally filtered
pub async fn list_subscriptions(
    State(state): State<SubscriptionAppState>,
    query: Result<Query<SubscriptionFilterRequest>, QueryRejection>,
) -> Result<Json<Vec<SubscriptionResponse>>, SubscriptionApiError> {
    const OP: &str = "list_subscriptions";

    let Query(request) = query.map_err(|e| SubscriptionApiError::rejected(OP, e.body_text()))?;
    let filter = request.into_filter().map_err(|e| SubscriptionApiError::invalid(OP, e))?;

    let subscriptions = state
        .list_subscriptions_handler()
        .handle(ListSubscriptionsQuery {
            filter: Some(filter),
        })
        .await
        .map_err(|e| SubscriptionApiError::failed(OP, e))?;

    Ok(Json(
        subscriptions.iter().map(SubscriptionResponse::from).collect(),
    ))
}

/// POST /api/subscriptions/calc - Total price of matching subscriptions
pub async fn calculate_price(
    State(state): State<SubscriptionAppState>,
    body: Result<Json<SubscriptionFilterRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>, SubscriptionApiError> {
    const OP: &str = "calculate_price";

    let Json(request) = body.map_err(|e| SubscriptionApiError::rejected(OP, e.body_text()))?;
    let filter = request.into_filter().map_err(|e| SubscriptionApiError::invalid(OP, e))?;

    let result = state
        .calculate_price_handler()
        .handle(CalculatePriceQuery { filter })
        .await
        .map_err(|e| SubscriptionApiError::failed(OP, e))?;

    Ok(Json(PriceResponse {
        price: result.total,
    }))
}

fn parse_id(operation: &'static str, raw: &str) -> Result<SubscriptionId, SubscriptionApiError> {
    raw.parse::<SubscriptionId>().map_err(|e| {
        SubscriptionApiError::rejected(operation, format!("Invalid subscription id '{}': {}", raw, e))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl SubscriptionApiError {
    /// Request could not be decoded.
    fn rejected(operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(operation, error = %message, "Request rejected");
        SubscriptionApiError::BadRequest(message)
    }

    /// Request decoded but a value is malformed.
    fn invalid(operation: &'static str, err: ValidationError) -> Self {
        Self::failed(operation, SubscriptionError::from(err))
    }

    /// Application handler failed.
    fn failed(operation: &'static str, err: SubscriptionError) -> Self {
        tracing::error!(operation, error = %err, "Subscription operation failed");
        SubscriptionApiError::from(err)
    }
}

impl From<SubscriptionError> for SubscriptionApiError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::NotFound(_) => SubscriptionApiError::NotFound(err.message()),
            SubscriptionError::ValidationFailed { .. } => {
                SubscriptionApiError::BadRequest(err.message())
            }
            SubscriptionError::Infrastructure(_) => SubscriptionApiError::Internal(err.message()),
        }
    }
}

impl IntoResponse for SubscriptionApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            SubscriptionApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            SubscriptionApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            SubscriptionApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
