use std::sync::Arc;

use warden_application::{
    AccessTokenDeserializer, AuthorizedUseCaseExecutor, CheckUserPermissionsUseCase,
    CreatePermissionUseCase, CreateRoleUseCase, GetApplicationHealthUseCase,
    PermissionRepository, RoleRepository, UpdateUserPermissionsUseCase, UpdateUserRolesUseCase,
    UserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub executor: AuthorizedUseCaseExecutor,
    pub create_permission: CreatePermissionUseCase,
    pub create_role: CreateRoleUseCase,
    pub check_user_permissions: CheckUserPermissionsUseCase,
    pub update_user_permissions: UpdateUserPermissionsUseCase,
    pub update_user_roles: UpdateUserRolesUseCase,
    pub get_application_health: GetApplicationHealthUseCase,
    pub access_token_deserializer: Arc<dyn AccessTokenDeserializer>,
}

impl AppState {
    /// Wires every use case over the same repositories.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        permission_repository: Arc<dyn PermissionRepository>,
        role_repository: Arc<dyn RoleRepository>,
        access_token_deserializer: Arc<dyn AccessTokenDeserializer>,
        get_application_health: GetApplicationHealthUseCase,
    ) -> Self {
        Self {
            executor: AuthorizedUseCaseExecutor::new(user_repository.clone()),
            create_permission: CreatePermissionUseCase::new(permission_repository.clone()),
            create_role: CreateRoleUseCase::new(
                role_repository.clone(),
                permission_repository.clone(),
            ),
            check_user_permissions: CheckUserPermissionsUseCase::new(user_repository.clone()),
            update_user_permissions: UpdateUserPermissionsUseCase::new(
                user_repository.clone(),
                permission_repository,
            ),
            update_user_roles: UpdateUserRolesUseCase::new(user_repository, role_repository),
            get_application_health,
            access_token_deserializer,
        }
    }
}
