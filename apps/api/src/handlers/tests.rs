use std::sync::Arc;

use async_trait::async_trait;
use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use warden_application::{
    AccessTokenDeserializer, DependencyHealth, GetApplicationHealthUseCase, HealthCheck,
    PermissionRepository, RoleRepository, UserRepository,
};
use warden_core::{AccessToken, AppError, AppResult};
use warden_domain::{Permission, Role, User, well_known_permissions};
use warden_infrastructure::{
    InMemoryPermissionRepository, InMemoryRoleRepository, InMemoryUserRepository,
};

use crate::dto::{
    CheckPermissionsRequest, CreatePermissionRequest, CreateRoleRequest,
    UpdateUserPermissionsRequest, UpdateUserRolesRequest,
};
use crate::error::ApiError;
use crate::middleware::RequestAccessToken;
use crate::state::AppState;

use super::{
    check_permissions_handler, create_permission_handler, create_role_handler, status_handler,
    update_user_permissions_handler, update_user_roles_handler,
};

struct RejectingDeserializer;

impl AccessTokenDeserializer for RejectingDeserializer {
    fn deserialize(&self, _raw_token: &str) -> AppResult<AccessToken> {
        Err(AppError::Unauthorized("invalid access token".to_owned()))
    }
}

struct StaticCheck(DependencyHealth);

#[async_trait]
impl HealthCheck for StaticCheck {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn check(&self) -> DependencyHealth {
        self.0.clone()
    }
}

struct Fixture {
    state: AppState,
    users: Arc<InMemoryUserRepository>,
    permissions: Arc<InMemoryPermissionRepository>,
    roles: Arc<InMemoryRoleRepository>,
}

async fn fixture(health: DependencyHealth) -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let permissions = Arc::new(InMemoryPermissionRepository::new());
    let roles = Arc::new(InMemoryRoleRepository::new());

    for name in well_known_permissions() {
        let Ok(permission) = Permission::new(name) else {
            panic!("well-known permission names are valid");
        };
        assert!(permissions.save(&permission).await.is_ok());
    }

    let Ok(admin) = User::new("admin@x.com", true) else {
        panic!("valid admin user");
    };
    let Ok(member) = User::new("member@x.com", false) else {
        panic!("valid member user");
    };
    assert!(users.save(&admin).await.is_ok());
    assert!(users.save(&member).await.is_ok());

    let state = AppState::new(
        users.clone(),
        permissions.clone(),
        roles.clone(),
        Arc::new(RejectingDeserializer),
        GetApplicationHealthUseCase::new(vec![Arc::new(StaticCheck(health))]),
    );

    Fixture {
        state,
        users,
        permissions,
        roles,
    }
}

fn token(subject: &str) -> Extension<RequestAccessToken> {
    Extension(RequestAccessToken(Some(AccessToken::new(
        subject,
        "openid",
        0,
        i64::MAX,
        "iam",
    ))))
}

fn anonymous() -> Extension<RequestAccessToken> {
    Extension(RequestAccessToken(None))
}

fn status_of(error: ApiError) -> StatusCode {
    error.into_response().status()
}

#[tokio::test]
async fn create_permission_returns_created_for_superuser() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = create_permission_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Json(CreatePermissionRequest {
            name: "report.read".to_owned(),
        }),
    )
    .await;

    assert!(matches!(result, Ok(StatusCode::CREATED)));
    let stored = fixture
        .permissions
        .find_by_names(&["report.read".to_owned()])
        .await;
    assert!(matches!(stored, Ok(ref stored) if stored.len() == 1));
}

#[tokio::test]
async fn create_permission_without_token_is_unauthorized() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = create_permission_handler(
        State(fixture.state.clone()),
        anonymous(),
        Json(CreatePermissionRequest {
            name: "report.read".to_owned(),
        }),
    )
    .await;

    match result {
        Err(error) => assert_eq!(status_of(error), StatusCode::UNAUTHORIZED),
        Ok(status) => panic!("expected rejection, got {status}"),
    }
}

#[tokio::test]
async fn create_role_without_permission_is_forbidden() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = create_role_handler(
        State(fixture.state.clone()),
        token("member@x.com"),
        Json(CreateRoleRequest {
            name: "editors".to_owned(),
            permissions: vec!["role.update".to_owned()],
        }),
    )
    .await;

    match result {
        Err(error) => assert_eq!(status_of(error), StatusCode::FORBIDDEN),
        Ok(status) => panic!("expected rejection, got {status}"),
    }
    let roles = fixture.roles.find_by_names(&["editors".to_owned()]).await;
    assert!(matches!(roles, Ok(ref roles) if roles.is_empty()));
}

#[tokio::test]
async fn create_role_with_unknown_permission_is_not_found() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = create_role_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Json(CreateRoleRequest {
            name: "editors".to_owned(),
            permissions: vec!["role.update".to_owned(), "does.not.exist".to_owned()],
        }),
    )
    .await;

    match result {
        Err(error) => assert_eq!(status_of(error), StatusCode::NOT_FOUND),
        Ok(status) => panic!("expected rejection, got {status}"),
    }
}

#[tokio::test]
async fn granted_role_is_visible_to_permission_check() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let created = create_role_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Json(CreateRoleRequest {
            name: "role-admins".to_owned(),
            permissions: vec!["role.create".to_owned(), "role.delete".to_owned()],
        }),
    )
    .await;
    assert!(matches!(created, Ok(StatusCode::CREATED)));

    let assigned = update_user_roles_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Path("member@x.com".to_owned()),
        Json(UpdateUserRolesRequest {
            roles: vec!["role-admins".to_owned()],
        }),
    )
    .await;
    assert!(matches!(assigned, Ok(StatusCode::OK)));

    let held = check_permissions_handler(
        State(fixture.state.clone()),
        token("member@x.com"),
        Json(CheckPermissionsRequest {
            permissions: vec!["role.create".to_owned(), "role.delete".to_owned()],
        }),
    )
    .await;
    let missing = check_permissions_handler(
        State(fixture.state.clone()),
        token("member@x.com"),
        Json(CheckPermissionsRequest {
            permissions: vec!["role.create".to_owned(), "user.update".to_owned()],
        }),
    )
    .await;

    assert!(matches!(held, Ok(Json(ref response)) if response.result));
    assert!(matches!(missing, Ok(Json(ref response)) if !response.result));
}

#[tokio::test]
async fn check_permissions_requires_token() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = check_permissions_handler(
        State(fixture.state.clone()),
        anonymous(),
        Json(CheckPermissionsRequest {
            permissions: vec!["role.create".to_owned()],
        }),
    )
    .await;

    match result {
        Err(error) => assert_eq!(status_of(error), StatusCode::UNAUTHORIZED),
        Ok(_) => panic!("expected rejection"),
    }
}

#[tokio::test]
async fn update_user_permissions_replaces_grants() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = update_user_permissions_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Path("member@x.com".to_owned()),
        Json(UpdateUserPermissionsRequest {
            permissions: vec!["user.update".to_owned()],
        }),
    )
    .await;

    assert!(matches!(result, Ok(StatusCode::OK)));
    let member = fixture.users.find_by_email("member@x.com").await;
    assert!(matches!(member, Ok(Some(ref member)) if member.has_permission("user.update")));
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = update_user_permissions_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Path("ghost@x.com".to_owned()),
        Json(UpdateUserPermissionsRequest {
            permissions: vec!["user.update".to_owned()],
        }),
    )
    .await;

    match result {
        Err(error) => assert_eq!(status_of(error), StatusCode::NOT_FOUND),
        Ok(status) => panic!("expected rejection, got {status}"),
    }
}

#[tokio::test]
async fn status_reports_ok_when_dependencies_are_healthy() {
    let fixture = fixture(DependencyHealth::ok()).await;

    let result = status_handler(State(fixture.state.clone())).await;

    let Ok((status, Json(body))) = result else {
        panic!("status should always respond");
    };
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    assert!(body.dependencies.contains_key("postgres"));
}

#[tokio::test]
async fn status_reports_unavailable_when_a_dependency_fails() {
    let fixture = fixture(DependencyHealth::error("connection refused")).await;

    let result = status_handler(State(fixture.state.clone())).await;

    let Ok((status, Json(body))) = result else {
        panic!("status should always respond");
    };
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.status, "degraded");

    let json = serde_json::to_value(&body);
    assert!(
        matches!(json, Ok(ref json) if json["dependencies"]["postgres"]["detail"] == "connection refused")
    );
}

#[tokio::test]
async fn role_assignment_survives_reload() {
    let fixture = fixture(DependencyHealth::ok()).await;
    let Ok(permission) = Permission::new("report.read") else {
        panic!("valid permission");
    };
    let Ok(role) = Role::new("readers", vec![permission]) else {
        panic!("valid role");
    };
    assert!(fixture.roles.save(&role).await.is_ok());

    let result = update_user_roles_handler(
        State(fixture.state.clone()),
        token("admin@x.com"),
        Path("member@x.com".to_owned()),
        Json(UpdateUserRolesRequest {
            roles: vec!["readers".to_owned()],
        }),
    )
    .await;

    assert!(matches!(result, Ok(StatusCode::OK)));
    let member = fixture.users.find_by_email("member@x.com").await;
    assert!(matches!(member, Ok(Some(ref member)) if member.has_permission("report.read")));
}
