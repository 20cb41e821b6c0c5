//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use warden_application::UserRepository;
use warden_core::{AppError, AppResult};
use warden_domain::User;

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    email: String,
    superuser: bool,
}

mod lookup;
mod save;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> AppResult<()> {
        self.save_impl(user).await
    }

    async fn save_account(&self, email: &str, superuser: bool) -> AppResult<()> {
        self.save_account_impl(email, superuser).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_by_email_impl(email).await
    }
}
