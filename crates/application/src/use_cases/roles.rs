use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use warden_domain::{CREATE_ROLE, Role};

use super::resolution::{ensure_all_resolved, requested_names};
use crate::{PermissionRepository, RoleRepository, UseCase, UseCaseResponse};

/// Input for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleRequest {
    /// Role name.
    pub name: String,
    /// Names of the permissions the role grants.
    pub permissions: Vec<String>,
}

/// Creates a role after resolving every requested permission.
#[derive(Clone)]
pub struct CreateRoleUseCase {
    role_repository: Arc<dyn RoleRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
}

impl CreateRoleUseCase {
    /// Creates the use case from role and permission repositories.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RoleRepository>,
        permission_repository: Arc<dyn PermissionRepository>,
    ) -> Self {
        Self {
            role_repository,
            permission_repository,
        }
    }
}

#[async_trait]
impl UseCase for CreateRoleUseCase {
    type Request = CreateRoleRequest;
    type Output = ();

    fn required_permissions(&self) -> &[&'static str] {
        &[CREATE_ROLE]
    }

    async fn execute(&self, request: CreateRoleRequest) -> UseCaseResponse<()> {
        let names = requested_names(request.permissions)?;
        let permissions = self.permission_repository.find_by_names(&names).await?;
        ensure_all_resolved(
            "permissions",
            &names,
            permissions.iter().map(|permission| permission.name()),
        )?;

        let role = Role::new(request.name, permissions)?;
        self.role_repository.save(&role).await?;

        info!(
            role = %role.name(),
            permission_count = role.permissions().len(),
            "created role"
        );
        Ok(())
    }
}
