mod config;
mod crypto;
mod db;
mod domain;
mod error;
mod middleware;
mod services;
mod state;
mod time_utils;
mod web;

use crate::config::Config;
use crate::services::photo_upload::LegacyPhotoUploader;
use crate::state::SharedState;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LIMITER_CLEANUP_SECS: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if !time_utils::is_valid_timezone(&config.timezone) {
        tracing::warn!(
            "PORTAL_TIMEZONE {} is not recognised, submission days will follow UTC",
            config.timezone
        );
    }

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            e
        })?;
    tracing::info!("Database ready");

    let crypto = crypto::Crypto::from_base64_key(&config.enc_key_b64)
        .map_err(|e| anyhow::anyhow!("APP_ENC_KEY: {e}"))?;
    let uploader = Arc::new(LegacyPhotoUploader::new(config.legacy_upload_url.clone()));
    let addr = config.bind_addr.clone();

    let shared: SharedState = Arc::new(state::AppState::new(
        config,
        crypto,
        db::PgStore::new(pool),
        uploader,
    ));

    let limiter = shared.login_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(LIMITER_CLEANUP_SECS));
        loop {
            interval.tick().await;
            limiter.cleanup().await;
        }
    });

    let app = web::routes(shared).layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
