use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use warden_core::{AppError, AppResult};
use warden_domain::{UPDATE_USER, User};

use super::resolution::{ensure_all_resolved, requested_names};
use crate::{PermissionRepository, RoleRepository, UseCase, UseCaseResponse, UserRepository};

async fn load_user(repository: &dyn UserRepository, email: &str) -> AppResult<User> {
    repository
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {email} not found")))
}

/// Input for creating or refreshing a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// User email.
    pub email: String,
    /// Whether the user bypasses permission checks.
    pub superuser: bool,
}

/// Upserts a user account keyed by email.
///
/// Only the account row is written. Permission and role assignments are never
/// read or rewritten, so a replayed request cannot undo a concurrent grant change.
#[derive(Clone)]
pub struct CreateUserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl CreateUserUseCase {
    /// Creates the use case from a user repository.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase for CreateUserUseCase {
    type Request = CreateUserRequest;
    type Output = ();

    fn required_permissions(&self) -> &[&'static str] {
        &[]
    }

    async fn execute(&self, request: CreateUserRequest) -> UseCaseResponse<()> {
        let user = User::new(request.email, request.superuser)?;
        self.repository
            .save_account(user.email(), user.is_superuser())
            .await?;

        info!(email = %user.email(), superuser = user.is_superuser(), "saved user");
        Ok(())
    }
}

/// Input for checking a user's permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckUserPermissionsRequest {
    /// User email.
    pub email: String,
    /// Permission names that must all be held.
    pub permissions: Vec<String>,
}

/// Answers whether a user holds every named permission.
#[derive(Clone)]
pub struct CheckUserPermissionsUseCase {
    repository: Arc<dyn UserRepository>,
}

impl CheckUserPermissionsUseCase {
    /// Creates the use case from a user repository.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase for CheckUserPermissionsUseCase {
    type Request = CheckUserPermissionsRequest;
    type Output = bool;

    fn required_permissions(&self) -> &[&'static str] {
        &[]
    }

    async fn execute(&self, request: CheckUserPermissionsRequest) -> UseCaseResponse<bool> {
        let user = load_user(self.repository.as_ref(), &request.email).await?;
        Ok(user.has_all_permissions(request.permissions.as_slice()))
    }
}

/// Input for replacing a user's direct permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserPermissionsRequest {
    /// User email.
    pub email: String,
    /// Complete new set of permission names.
    pub permissions: Vec<String>,
}

/// Replaces a user's direct permissions wholesale.
#[derive(Clone)]
pub struct UpdateUserPermissionsUseCase {
    user_repository: Arc<dyn UserRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
}

impl UpdateUserPermissionsUseCase {
    /// Creates the use case from user and permission repositories.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        permission_repository: Arc<dyn PermissionRepository>,
    ) -> Self {
        Self {
            user_repository,
            permission_repository,
        }
    }
}

#[async_trait]
impl UseCase for UpdateUserPermissionsUseCase {
    type Request = UpdateUserPermissionsRequest;
    type Output = ();

    fn required_permissions(&self) -> &[&'static str] {
        &[UPDATE_USER]
    }

    async fn execute(&self, request: UpdateUserPermissionsRequest) -> UseCaseResponse<()> {
        let mut user = load_user(self.user_repository.as_ref(), &request.email).await?;

        let names = requested_names(request.permissions)?;
        let permissions = self.permission_repository.find_by_names(&names).await?;
        ensure_all_resolved(
            "permissions",
            &names,
            permissions.iter().map(|permission| permission.name()),
        )?;

        user.replace_permissions(permissions);
        self.user_repository.save(&user).await?;

        info!(email = %user.email(), permission_count = names.len(), "replaced user permissions");
        Ok(())
    }
}

/// Input for replacing a user's roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRolesRequest {
    /// User email.
    pub email: String,
    /// Complete new set of role names.
    pub roles: Vec<String>,
}

/// Replaces a user's roles wholesale.
#[derive(Clone)]
pub struct UpdateUserRolesUseCase {
    user_repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RoleRepository>,
}

impl UpdateUserRolesUseCase {
    /// Creates the use case from user and role repositories.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
        }
    }
}

#[async_trait]
impl UseCase for UpdateUserRolesUseCase {
    type Request = UpdateUserRolesRequest;
    type Output = ();

    fn required_permissions(&self) -> &[&'static str] {
        &[UPDATE_USER]
    }

    async fn execute(&self, request: UpdateUserRolesRequest) -> UseCaseResponse<()> {
        let mut user = load_user(self.user_repository.as_ref(), &request.email).await?;

        let names = requested_names(request.roles)?;
        let roles = self.role_repository.find_by_names(&names).await?;
        ensure_all_resolved("roles", &names, roles.iter().map(|role| role.name()))?;

        user.replace_roles(roles);
        self.user_repository.save(&user).await?;

        info!(email = %user.email(), role_count = names.len(), "replaced user roles");
        Ok(())
    }
}
