//! In-crate fakes for port traits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use warden_core::{AppError, AppResult};
use warden_domain::{Permission, Role, User};

use crate::{PermissionRepository, RoleRepository, UserRepository};

pub(crate) fn permission(name: &str) -> Permission {
    match Permission::new(name) {
        Ok(permission) => permission,
        Err(error) => panic!("invalid test permission: {error}"),
    }
}

pub(crate) fn role(name: &str, permissions: &[&str]) -> Role {
    let permissions = permissions.iter().map(|name| permission(name)).collect();
    match Role::new(name, permissions) {
        Ok(role) => role,
        Err(error) => panic!("invalid test role: {error}"),
    }
}

pub(crate) fn user(email: &str, superuser: bool, permissions: &[&str], roles: Vec<Role>) -> User {
    let permissions = permissions.iter().map(|name| permission(name)).collect();
    match User::from_parts(email, superuser, permissions, roles) {
        Ok(user) => user,
        Err(error) => panic!("invalid test user: {error}"),
    }
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub(crate) users: Mutex<HashMap<String, User>>,
    pub(crate) lookups: Mutex<Vec<String>>,
    pub(crate) saves: Mutex<Vec<User>>,
    pub(crate) account_saves: Mutex<Vec<(String, bool)>>,
    pub(crate) unavailable: bool,
    pub(crate) stall_account_saves: bool,
}

impl FakeUserRepository {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(
                users
                    .into_iter()
                    .map(|user| (user.email().to_owned(), user))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Account saves never complete, like a store that hangs mid-write.
    pub(crate) fn stalling() -> Self {
        Self {
            stall_account_saves: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn save(&self, user: &User) -> AppResult<()> {
        self.saves.lock().await.push(user.clone());
        self.users
            .lock()
            .await
            .insert(user.email().to_owned(), user.clone());
        Ok(())
    }

    async fn save_account(&self, email: &str, superuser: bool) -> AppResult<()> {
        if self.stall_account_saves {
            std::future::pending::<()>().await;
        }
        self.account_saves
            .lock()
            .await
            .push((email.to_owned(), superuser));
        if self.unavailable {
            return Err(AppError::Internal("user store unavailable".to_owned()));
        }

        let mut users = self.users.lock().await;
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
        self.lookups.lock().await.push(email.to_owned());
        if self.unavailable {
            return Err(AppError::Internal("user store unavailable".to_owned()));
        }

        Ok(self.users.lock().await.get(email).cloned())
    }
}

#[derive(Default)]
pub(crate) struct FakePermissionRepository {
    pub(crate) permissions: Mutex<Vec<Permission>>,
}

impl FakePermissionRepository {
    pub(crate) fn with_names(names: &[&str]) -> Self {
        Self {
            permissions: Mutex::new(names.iter().map(|name| permission(name)).collect()),
        }
    }
}

#[async_trait]
impl PermissionRepository for FakePermissionRepository {
    async fn save(&self, permission: &Permission) -> AppResult<()> {
        let mut permissions = self.permissions.lock().await;
        permissions.retain(|existing| existing.name() != permission.name());
        permissions.push(permission.clone());
        Ok(())
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Permission>> {
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .filter(|permission| names.iter().any(|name| name == permission.name()))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeRoleRepository {
    pub(crate) roles: Mutex<Vec<Role>>,
}

impl FakeRoleRepository {
    pub(crate) fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Mutex::new(roles),
        }
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn save(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        roles.retain(|existing| existing.name() != role.name());
        roles.push(role.clone());
        Ok(())
    }

    async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|role| names.iter().any(|name| name == role.name()))
            .cloned()
            .collect())
    }
}
