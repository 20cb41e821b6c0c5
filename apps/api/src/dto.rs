mod health;
mod permissions;

pub use health::{HealthDependencyResponse, HealthResponse};
pub use permissions::{
    CheckPermissionsRequest, CheckPermissionsResponse, CreatePermissionRequest,
    CreateRoleRequest, UpdateUserPermissionsRequest, UpdateUserRolesRequest,
};
