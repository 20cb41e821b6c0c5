//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_ports;
mod permission_bootstrap;
mod use_case;
mod use_case_executor;
mod use_cases;
mod user_provisioning_consumer;

#[cfg(test)]
mod test_fakes;

pub use authorization_ports::{
    AccessTokenDeserializer, DeliveredEvent, DependencyHealth, DependencyStatus, EventListener,
    EventListenerFactory, HealthCheck, PermissionRepository, RoleRepository, UserRepository,
};
pub use permission_bootstrap::bootstrap_permissions;
pub use use_case::{UseCase, UseCaseResponse};
pub use use_case_executor::AuthorizedUseCaseExecutor;
pub use use_cases::{
    ApplicationHealth, CheckUserPermissionsRequest, CheckUserPermissionsUseCase,
    CreatePermissionRequest, CreatePermissionUseCase, CreateRoleRequest, CreateRoleUseCase,
    CreateUserRequest, CreateUserUseCase, GetApplicationHealthUseCase,
    UpdateUserPermissionsRequest, UpdateUserPermissionsUseCase, UpdateUserRolesRequest,
    UpdateUserRolesUseCase,
};
pub use user_provisioning_consumer::UserCreatedEventConsumer;
