//! PostgreSQL implementation of SubscriptionRepository.
//!
//! Persists subscriptions to the `subscriptions` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode, MonthYear, SubscriptionId};
use crate::domain::subscription::{
    NewSubscription, Subscription, SubscriptionFilter, SubscriptionPatch,
};
use crate::ports::SubscriptionRepository;

use super::query::{build_select, build_update, BuiltQuery, QueryBuildError, SqlValue, COLUMNS};

/// PostgreSQL implementation of SubscriptionRepository.
#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new PostgresSubscriptionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO subscriptions (service_name, price, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(subscription.service_name())
            .bind(subscription.price())
            .bind(subscription.user_id())
            .bind(subscription.start_date().as_date())
            .bind(subscription.end_date().map(|d| d.as_date()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("create", "Failed to insert subscription", e))?;

        row_to_subscription(row)
    }

    async fn get(&self, id: SubscriptionId) -> Result<Subscription, DomainError> {
        let sql = format!("SELECT {} FROM subscriptions WHERE id = $1", COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("get", "Failed to fetch subscription", e))?;

        match row {
            Some(row) => row_to_subscription(row),
            None => Err(not_found(id)),
        }
    }

    async fn update(
        &self,
        id: SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<(), DomainError> {
        let BuiltQuery { sql, params } = build_update(id, patch).map_err(|e| match e {
            QueryBuildError::EmptyPatch => DomainError::validation("patch", e.to_string()),
        })?;
        tracing::debug!(operation = "update", sql = %sql, "Update query");

        let result = bind_all(sqlx::query(&sql), params)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("update", "Failed to update subscription", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(operation = "update", id = %id, "Nothing updated");
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: SubscriptionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete", "Failed to delete subscription", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(operation = "delete", id = %id, "Nothing deleted");
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: Option<&SubscriptionFilter>,
    ) -> Result<Vec<Subscription>, DomainError> {
        let BuiltQuery { sql, params } = build_select(filter);
        tracing::debug!(operation = "list", sql = %sql, params = ?params, "Select query");

        let rows = bind_all(sqlx::query(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list", "Failed to list subscriptions", e))?;

        rows.into_iter().map(row_to_subscription).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: Vec<SqlValue>,
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlValue::Text(value) => query.bind(value),
            SqlValue::BigInt(value) => query.bind(value),
            SqlValue::Date(value) => query.bind(value),
        };
    }
    query
}

fn not_found(id: SubscriptionId) -> DomainError {
    DomainError::new(
        ErrorCode::SubscriptionNotFound,
        format!("Subscription not found: {}", id),
    )
}

fn database_error(operation: &'static str, context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %e, "{}", context);
    DomainError::database(format!("{}: {}", context, e))
}

fn row_to_subscription(row: PgRow) -> Result<Subscription, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;

    let service_name: String = row
        .try_get("service_name")
        .map_err(|e| DomainError::database(format!("Failed to get service_name: {}", e)))?;

    let price: i64 = row
        .try_get("price")
        .map_err(|e| DomainError::database(format!("Failed to get price: {}", e)))?;

    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| DomainError::database(format!("Failed to get user_id: {}", e)))?;

    let start_date: NaiveDate = row
        .try_get("start_date")
        .map_err(|e| DomainError::database(format!("Failed to get start_date: {}", e)))?;

    let end_date: Option<NaiveDate> = row
        .try_get("end_date")
        .map_err(|e| DomainError::database(format!("Failed to get end_date: {}", e)))?;

    Ok(Subscription::reconstitute(
        SubscriptionId::new(id),
        service_name,
        price,
        user_id,
        MonthYear::from_date(start_date),
        end_date.map(MonthYear::from_date),
    ))
}
