//! Warden identity event worker runtime.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use warden_application::{CreateUserUseCase, UserCreatedEventConsumer};
use warden_core::{AppError, AppResult};
use warden_infrastructure::{
    PostgresUserRepository, RedisStreamEventListenerFactory, RedisStreamSettings,
};

#[derive(Debug, Clone)]
struct WorkerConfig {
    database_url: String,
    redis_url: String,
    stream_prefix: String,
    consumer_group: String,
    worker_id: String,
    block_ms: u64,
    batch_size: usize,
    claim_idle_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WorkerConfig::load()?;
    let pool = connect_pool(config.database_url.as_str()).await?;
    let redis_client = redis::Client::open(config.redis_url.as_str())
        .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;

    let listener_factory =
        RedisStreamEventListenerFactory::new(redis_client, config.stream_settings());
    let create_user = CreateUserUseCase::new(Arc::new(PostgresUserRepository::new(pool)));
    let consumer = UserCreatedEventConsumer::new(&listener_factory, create_user).await?;

    info!(
        worker_id = %config.worker_id,
        consumer_group = %config.consumer_group,
        "warden worker started"
    );

    tokio::select! {
        result = consumer.run() => {
            if let Err(error) = &result {
                warn!(error = %error, "event consumer exited with error");
            }
            result
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(|error| {
                AppError::Internal(format!("failed to listen for shutdown signal: {error}"))
            })?;
            info!("shutdown signal received, stopping worker");
            Ok(())
        }
    }
}

async fn connect_pool(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

impl WorkerConfig {
    fn load() -> AppResult<Self> {
        let database_url = required_env("DATABASE_URL")?;
        let redis_url = required_env("REDIS_URL")?;
        let stream_prefix = optional_env("EVENT_STREAM_PREFIX")
            .unwrap_or_else(|| "warden:events".to_owned());
        let consumer_group =
            optional_env("EVENT_CONSUMER_GROUP").unwrap_or_else(|| "warden".to_owned());
        let worker_id = optional_env("WORKER_ID")
            .unwrap_or_else(|| format!("worker-{}", uuid::Uuid::new_v4()));
        let block_ms = parse_env_u64("EVENT_BLOCK_MS", 5000)?;
        let batch_size = parse_env_usize("EVENT_BATCH_SIZE", 16)?;
        let claim_idle_ms = parse_env_u64("EVENT_CLAIM_IDLE_MS", 60_000)?;

        if batch_size == 0 {
            return Err(AppError::Validation(
                "EVENT_BATCH_SIZE must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            redis_url,
            stream_prefix,
            consumer_group,
            worker_id,
            block_ms,
            batch_size,
            claim_idle_ms,
        })
    }

    fn stream_settings(&self) -> RedisStreamSettings {
        RedisStreamSettings {
            stream_prefix: self.stream_prefix.clone(),
            consumer_group: self.consumer_group.clone(),
            consumer_name: self.worker_id.clone(),
            block: Duration::from_millis(self.block_ms),
            batch_size: self.batch_size,
            claim_idle: Duration::from_millis(self.claim_idle_ms),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env_usize(name: &str, default: usize) -> AppResult<usize> {
    match env::var(name) {
        Ok(value) => value.parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
