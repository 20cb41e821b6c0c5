//! Business operations exposed through the authorized executor.
//!
//! Each operation declares its required permissions statically. Multi-name
//! lookups resolve every requested name or abort before anything is persisted.

mod health;
mod permissions;
mod resolution;
mod roles;
mod users;

pub use health::{ApplicationHealth, GetApplicationHealthUseCase};
pub use permissions::{CreatePermissionRequest, CreatePermissionUseCase};
pub use roles::{CreateRoleRequest, CreateRoleUseCase};
pub use users::{
    CheckUserPermissionsRequest, CheckUserPermissionsUseCase, CreateUserRequest,
    CreateUserUseCase, UpdateUserPermissionsRequest, UpdateUserPermissionsUseCase,
    UpdateUserRolesRequest, UpdateUserRolesUseCase,
};
