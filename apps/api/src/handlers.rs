use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use warden_core::AppError;

use crate::dto::{
    CheckPermissionsRequest, CheckPermissionsResponse, CreatePermissionRequest,
    CreateRoleRequest, HealthResponse, UpdateUserPermissionsRequest, UpdateUserRolesRequest,
};
use crate::error::ApiResult;
use crate::middleware::RequestAccessToken;
use crate::state::AppState;

mod health;
mod permissions;
mod roles;
mod users;

pub use health::status_handler;
pub use permissions::{check_permissions_handler, create_permission_handler};
pub use roles::create_role_handler;
pub use users::{update_user_permissions_handler, update_user_roles_handler};

#[cfg(test)]
mod tests;
