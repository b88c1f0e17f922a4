//! Subscriptions API server binary.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use subscriptions_api::adapters::{api_router, PostgresSubscriptionRepository, SubscriptionAppState};
use subscriptions_api::config::AppConfig;
use subscriptions_api::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server)?;

    tracing::info!(
        database = ?config.database,
        "Starting subscriptions API"
    );

    let db = &config.database;
    let pool = PgPoolOptions::new()
        .min_connections(db.min_connections)
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .idle_timeout(db.idle_timeout())
        .max_lifetime(db.max_lifetime())
        .connect_with(db.connect_options()?)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Could not connect to database");
            e
        })?;

    let repository = Arc::new(PostgresSubscriptionRepository::new(pool.clone()));
    let app = api_router(SubscriptionAppState::new(repository), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
