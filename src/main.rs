//! Flightdeck server binary.
//!
//! Loads configuration, connects to PostgreSQL, and serves the
//! entitlement API.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use flightdeck::adapters::http::entitlement::{entitlement_routes, EntitlementAppState};
use flightdeck::adapters::postgres::{PostgresAdminDirectory, PostgresSubscriptionStore};
use flightdeck::config::AppConfig;
use flightdeck::ports::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(url = %config.database.redacted_url(), "connecting to postgres");
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!().run(&pool).await?;
    }

    let state = EntitlementAppState {
        subscription_store: Arc::new(PostgresSubscriptionStore::new(pool.clone())),
        admin_directory: Arc::new(PostgresAdminDirectory::new(pool)),
        clock: Arc::new(SystemClock),
        trial_days: config.trial.days,
    };

    let app = Router::new()
        .nest("/api/entitlements", entitlement_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr();
    tracing::info!(
        environment = config.server.environment.as_str(),
        %addr,
        "starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}
