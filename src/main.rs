use anyhow::Context;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

mod auth;
mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod models;
mod routes;
mod services;

use auth::rate_limit::RateLimitState;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
    /// Outbound client for the Google token and userinfo calls
    pub http: reqwest::Client,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(Config::load());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellness_buddy_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let db = db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    db::run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    if config.google.is_none() {
        tracing::warn!("Google sign-in disabled: GOOGLE_CLIENT_ID/SECRET/CALLBACK_URL not set");
    }

    let rate_limiter = RateLimitState::new(config.rate_limit_max, config.rate_limit_window_secs);
    auth::rate_limit::spawn_cleanup_worker(rate_limiter.clone());

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    let state = AppState {
        db,
        config: config.clone(),
        rate_limiter,
        http,
    };

    let app = routes::router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    // Connect info feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
