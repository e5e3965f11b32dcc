//! events-api server entry point.
//!
//! Loads configuration, selects the event store and starts the Axum HTTP
//! server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use events_api::api;
use events_api::app_state::AppState;
use events_api::config::{AppConfig, LogFormat};
use events_api::domain::EventRegistry;
use events_api::persistence::{EventRepository, PostgresEventRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid LISTEN_ADDR")?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting events-api");

    let repository = open_repository(&config).await?;
    let app_state = AppState::new(repository);

    let app = Router::new()
        .merge(api::build_router())
        .merge(swagger_ui())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(config.request_timeout_secs),
                )),
        )
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// PostgreSQL when persistence is enabled, otherwise the in-memory registry.
async fn open_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn EventRepository>> {
    if !config.persistence_enabled {
        tracing::warn!("persistence disabled; events are kept in memory only");
        return Ok(Arc::new(EventRegistry::new()));
    }

    let repository = PostgresEventRepository::connect(config)
        .await
        .context("failed to connect to PostgreSQL")?;
    if config.database_run_migrations {
        repository
            .migrate()
            .await
            .context("failed to run migrations")?;
        tracing::info!("database migrations applied");
    }
    tracing::info!(
        max_connections = config.database_max_connections,
        "connected to PostgreSQL"
    );
    Ok(Arc::new(repository))
}

#[cfg(feature = "swagger-ui")]
fn swagger_ui() -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", api::ApiDoc::openapi())
        .into()
}

#[cfg(not(feature = "swagger-ui"))]
fn swagger_ui() -> Router<AppState> {
    Router::new()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
