use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use warden_application::RoleRepository;
use warden_core::{AppError, AppResult};
use warden_domain::Role;

use crate::postgres_permission_repository::stored_permission;

/// PostgreSQL implementation of the role repository port.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RolePermissionRow {
    role_name: String,
    permission_name: Option<String>,
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn save(&self, role: &Role) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(role.name())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save role: {error}")))?;

        sqlx::query(
            r#"
            DELETE FROM role_permissions
            WHERE role_name = $1
            "#,
        )
        .bind(role.name())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear role permissions: {error}"))
        })?;

        for permission in role.permissions() {
            sqlx::query(
                r#"
                INSERT INTO role_permissions (role_name, permission_name)
                VALUES ($1, $2)
                ON CONFLICT (role_name, permission_name) DO NOTHING
                "#,
            )
            .bind(role.name())
            .bind(permission.name())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist role permissions: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT
                roles.name AS role_name,
                grants.permission_name
            FROM roles
            LEFT JOIN role_permissions AS grants
                ON grants.role_name = roles.name
            WHERE roles.name = ANY($1)
            ORDER BY roles.name, grants.permission_name
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find roles: {error}")))?;

        aggregate_roles(rows)
    }
}

/// Folds one row per role grant into populated roles, ordered by name.
pub(crate) fn aggregate_roles(rows: Vec<RolePermissionRow>) -> AppResult<Vec<Role>> {
    let mut by_name: BTreeMap<String, Vec<_>> = BTreeMap::new();

    for row in rows {
        let permissions = by_name.entry(row.role_name).or_default();
        if let Some(permission_name) = row.permission_name {
            permissions.push(stored_permission(permission_name)?);
        }
    }

    by_name
        .into_iter()
        .map(|(name, permissions)| {
            Role::new(name.as_str(), permissions).map_err(|error| {
                AppError::Internal(format!("invalid stored role '{name}': {error}"))
            })
        })
        .collect()
}
