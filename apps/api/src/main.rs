//! Warden API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use warden_application::{GetApplicationHealthUseCase, HealthCheck};
use warden_core::AppError;
use warden_infrastructure::{
    JwtAccessTokenDeserializer, PostgresHealthCheck, PostgresPermissionRepository,
    PostgresRoleRepository, PostgresUserRepository, RedisHealthCheck,
};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let http_client = reqwest::Client::new();
    let access_token_deserializer = JwtAccessTokenDeserializer::from_iam(
        &http_client,
        &config.iam_base_path,
        config.jwt_issuer.as_deref(),
    )
    .await?;
    info!(iam_base_path = %config.iam_base_path, "loaded identity provider signing key");

    let redis_client = config
        .redis_url
        .as_deref()
        .map(redis::Client::open)
        .transpose()
        .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;

    let health_checks: Vec<Arc<dyn HealthCheck>> = vec![
        Arc::new(PostgresHealthCheck::new(pool.clone())),
        Arc::new(RedisHealthCheck::new(redis_client)),
    ];

    let app_state = AppState::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresPermissionRepository::new(pool.clone())),
        Arc::new(PostgresRoleRepository::new(pool)),
        Arc::new(access_token_deserializer),
        GetApplicationHealthUseCase::new(health_checks),
    );

    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "warden-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
