use async_trait::async_trait;
use warden_core::AppResult;
use warden_domain::{Permission, Role, User};

/// Repository port for user aggregates.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Upserts a user keyed by email, replacing its permission and role assignments.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Upserts only the account row, leaving permission and role assignments untouched.
    async fn save_account(&self, email: &str, superuser: bool) -> AppResult<()>;

    /// Loads a user with its permissions, roles, and role permissions.
    ///
    /// Returns `Ok(None)` when no user has the email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Repository port for permissions.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Upserts a permission keyed by name.
    async fn save(&self, permission: &Permission) -> AppResult<()>;

    /// Returns the subset of named permissions that exist.
    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Permission>>;
}

/// Repository port for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Upserts a role keyed by name, replacing its permission set.
    async fn save(&self, role: &Role) -> AppResult<()>;

    /// Returns the subset of named roles that exist, each with its permissions.
    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Role>>;
}
