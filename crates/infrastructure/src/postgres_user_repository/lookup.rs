use crate::postgres_permission_repository::stored_permission;
use crate::postgres_role_repository::{RolePermissionRow, aggregate_roles};

use super::*;

impl PostgresUserRepository {
    pub(super) async fn find_by_email_impl(&self, email: &str) -> AppResult<Option<User>> {
        let Some(row) = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, superuser
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?
        else {
            return Ok(None);
        };

        let permissions = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission_name
            FROM user_permissions
            WHERE user_email = $1
            ORDER BY permission_name
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user permissions: {error}")))?
        .into_iter()
        .map(stored_permission)
        .collect::<AppResult<Vec<_>>>()?;

        let role_rows = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT
                assignments.role_name,
                grants.permission_name
            FROM user_roles AS assignments
            LEFT JOIN role_permissions AS grants
                ON grants.role_name = assignments.role_name
            WHERE assignments.user_email = $1
            ORDER BY assignments.role_name, grants.permission_name
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load user roles: {error}")))?;
        let roles = aggregate_roles(role_rows)?;

        User::from_parts(row.email.as_str(), row.superuser, permissions, roles)
            .map(Some)
            .map_err(|error| {
                AppError::Internal(format!("invalid stored user '{}': {error}", row.email))
            })
    }
}
