use super::*;

impl PostgresUserRepository {
    pub(super) async fn save_account_impl(&self, email: &str, superuser: bool) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (email, superuser)
            VALUES ($1, $2)
            ON CONFLICT (email)
            DO UPDATE SET superuser = EXCLUDED.superuser, updated_at = now()
            "#,
        )
        .bind(email)
        .bind(superuser)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save user account: {error}")))?;

        Ok(())
    }

    pub(super) async fn save_impl(&self, user: &User) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query(
            r#"
            INSERT INTO users (email, superuser)
            VALUES ($1, $2)
            ON CONFLICT (email)
            DO UPDATE SET superuser = EXCLUDED.superuser, updated_at = now()
            "#,
        )
        .bind(user.email())
        .bind(user.is_superuser())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save user: {error}")))?;

        sqlx::query(
            r#"
            DELETE FROM user_permissions
            WHERE user_email = $1
            "#,
        )
        .bind(user.email())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear user permissions: {error}"))
        })?;

        for permission in user.permissions() {
            sqlx::query(
                r#"
                INSERT INTO user_permissions (user_email, permission_name)
                VALUES ($1, $2)
                ON CONFLICT (user_email, permission_name) DO NOTHING
                "#,
            )
            .bind(user.email())
            .bind(permission.name())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist user permissions: {error}"))
            })?;
        }

        sqlx::query(
            r#"
            DELETE FROM user_roles
            WHERE user_email = $1
            "#,
        )
        .bind(user.email())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to clear user roles: {error}")))?;

        for role in user.roles() {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_email, role_name)
                VALUES ($1, $2)
                ON CONFLICT (user_email, role_name) DO NOTHING
                "#,
            )
            .bind(user.email())
            .bind(role.name())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist user roles: {error}"))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }
}
