use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use warden_domain::{CREATE_PERMISSION, Permission};

use crate::{PermissionRepository, UseCase, UseCaseResponse};

/// Input for creating a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionRequest {
    /// Permission name.
    pub name: String,
}

/// Upserts a permission by name.
#[derive(Clone)]
pub struct CreatePermissionUseCase {
    repository: Arc<dyn PermissionRepository>,
}

impl CreatePermissionUseCase {
    /// Creates the use case from a permission repository.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase for CreatePermissionUseCase {
    type Request = CreatePermissionRequest;
    type Output = ();

    fn required_permissions(&self) -> &[&'static str] {
        &[CREATE_PERMISSION]
    }

    async fn execute(&self, request: CreatePermissionRequest) -> UseCaseResponse<()> {
        let permission = Permission::new(request.name)?;
        self.repository.save(&permission).await?;

        info!(permission = %permission.name(), "created permission");
        Ok(())
    }
}
