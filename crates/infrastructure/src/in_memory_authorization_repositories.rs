//! In-memory adapters for the user, role, and permission ports.
//!
//! Used by API handler tests and local runs without PostgreSQL.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use warden_application::{PermissionRepository, RoleRepository, UserRepository};
use warden_core::AppResult;
use warden_domain::{Permission, Role, User};

/// In-memory user repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> AppResult<()> {
        self.users
            .write()
            .await
            .insert(user.email().to_owned(), user.clone());
        Ok(())
    }

    async fn save_account(&self, email: &str, superuser: bool) -> AppResult<()> {
        let mut users = self.users.write().await;
        let account = match users.get(email) {
            Some(existing) => User::from_parts(
                email,
                superuser,
                existing.permissions().to_vec(),
                existing.roles().to_vec(),
            )?,
            None => User::new(email, superuser)?,
        };
        users.insert(email.to_owned(), account);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

/// In-memory permission repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    permissions: RwLock<BTreeMap<String, Permission>>,
}

impl InMemoryPermissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn save(&self, permission: &Permission) -> AppResult<()> {
        self.permissions
            .write()
            .await
            .insert(permission.name().to_owned(), permission.clone());
        Ok(())
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;
        Ok(permissions
            .values()
            .filter(|permission| names.iter().any(|name| name == permission.name()))
            .cloned()
            .collect())
    }
}

/// In-memory role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<BTreeMap<String, Role>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn save(&self, role: &Role) -> AppResult<()> {
        self.roles
            .write()
            .await
            .insert(role.name().to_owned(), role.clone());
        Ok(())
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles
            .values()
            .filter(|role| names.iter().any(|name| name == role.name()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use warden_application::{PermissionRepository, UserRepository};
    use warden_domain::{Permission, User};

    use super::{InMemoryPermissionRepository, InMemoryUserRepository};

    #[tokio::test]
    async fn saving_a_user_twice_keeps_one_entry() {
        let repository = InMemoryUserRepository::new();
        let Ok(user) = User::new("b@x.com", true) else {
            panic!("valid user");
        };

        assert!(repository.save(&user).await.is_ok());
        assert!(repository.save(&user).await.is_ok());

        assert_eq!(repository.users.read().await.len(), 1);
        assert!(matches!(repository.find_by_email("b@x.com").await, Ok(Some(_))));
        assert!(matches!(repository.find_by_email("c@x.com").await, Ok(None)));
    }

    #[tokio::test]
    async fn save_account_keeps_assignments() {
        let repository = InMemoryUserRepository::new();
        let Ok(permission) = Permission::new("report.read") else {
            panic!("valid permission");
        };
        let Ok(user) = User::from_parts("b@x.com", false, vec![permission], Vec::new()) else {
            panic!("valid user");
        };
        assert!(repository.save(&user).await.is_ok());

        assert!(repository.save_account("b@x.com", true).await.is_ok());

        let stored = repository.find_by_email("b@x.com").await;
        assert!(matches!(
            stored,
            Ok(Some(ref stored)) if stored.is_superuser() && stored.permissions().len() == 1
        ));
    }

    #[tokio::test]
    async fn find_by_names_returns_found_subset() {
        let repository = InMemoryPermissionRepository::new();
        let Ok(permission) = Permission::new("report.read") else {
            panic!("valid permission");
        };
        assert!(repository.save(&permission).await.is_ok());

        let found = repository
            .find_by_names(&["report.read".to_owned(), "report.write".to_owned()])
            .await;

        assert!(matches!(found, Ok(ref found) if found.len() == 1));
    }
}
