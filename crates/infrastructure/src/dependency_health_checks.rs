//! Health probes for the PostgreSQL and Redis dependencies.

use async_trait::async_trait;
use redis::AsyncCommands;
use sqlx::PgPool;

use warden_application::{DependencyHealth, HealthCheck};

/// Probes PostgreSQL with `SELECT 1`.
#[derive(Clone)]
pub struct PostgresHealthCheck {
    pool: PgPool,
}

impl PostgresHealthCheck {
    /// Creates a probe over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for PostgresHealthCheck {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn check(&self) -> DependencyHealth {
        let check = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        match check {
            Ok(_) => DependencyHealth::ok(),
            Err(error) => DependencyHealth::error(format!("postgres check failed: {error}")),
        }
    }
}

/// Probes Redis with `PING`. Reports `disabled` when no client is configured.
#[derive(Clone)]
pub struct RedisHealthCheck {
    client: Option<redis::Client>,
}

impl RedisHealthCheck {
    /// Creates a probe; `None` marks Redis as not configured.
    #[must_use]
    pub fn new(client: Option<redis::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthCheck for RedisHealthCheck {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(&self) -> DependencyHealth {
        let Some(client) = &self.client else {
            return DependencyHealth::disabled();
        };

        let mut connection = match client.get_multiplexed_async_connection().await {
            Ok(connection) => connection,
            Err(error) => {
                return DependencyHealth::error(format!("redis connection failed: {error}"));
            }
        };

        match connection.ping::<String>().await {
            Ok(value) if value.eq_ignore_ascii_case("pong") => DependencyHealth::ok(),
            Ok(value) => DependencyHealth::error(format!("unexpected redis ping response: {value}")),
            Err(error) => DependencyHealth::error(format!("redis ping failed: {error}")),
        }
    }
}
