use std::net::SocketAddr;
use std::sync::Arc;

use altis_api::{app, AppState};
use altis_core::SeatAllocator;
use altis_store::{app_config::Config, DbClient, PostgresFlightRepository};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "altis_api=debug,altis_core=debug,altis_store=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Altis seating API on port {}", config.server.port);

    let db = DbClient::new(&config.database).context("Invalid database configuration")?;
    if config.database.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let flight_repo = Arc::new(PostgresFlightRepository::new(db.pool.clone()));
    let app_state = AppState::new(flight_repo, SeatAllocator::new(config.seating.clone()));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
