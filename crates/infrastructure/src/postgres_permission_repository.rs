use async_trait::async_trait;
use sqlx::PgPool;

use warden_application::PermissionRepository;
use warden_core::{AppError, AppResult};
use warden_domain::Permission;

/// PostgreSQL implementation of the permission repository port.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn save(&self, permission: &Permission) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO permissions (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(permission.name())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save permission: {error}")))?;

        Ok(())
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM permissions
            WHERE name = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find permissions: {error}")))?;

        rows.into_iter().map(stored_permission).collect()
    }
}

pub(crate) fn stored_permission(name: String) -> AppResult<Permission> {
    Permission::new(name.as_str()).map_err(|error| {
        AppError::Internal(format!("invalid stored permission '{name}': {error}"))
    })
}
