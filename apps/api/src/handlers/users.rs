use super::*;

pub async fn update_user_permissions_handler(
    State(state): State<AppState>,
    Extension(RequestAccessToken(access_token)): Extension<RequestAccessToken>,
    Path(email): Path<String>,
    Json(payload): Json<UpdateUserPermissionsRequest>,
) -> ApiResult<StatusCode> {
    state
        .executor
        .execute(
            &state.update_user_permissions,
            warden_application::UpdateUserPermissionsRequest {
                email,
                permissions: payload.permissions,
            },
            access_token.as_ref(),
        )
        .await?;

    Ok(StatusCode::OK)
}

pub async fn update_user_roles_handler(
    State(state): State<AppState>,
    Extension(RequestAccessToken(access_token)): Extension<RequestAccessToken>,
    Path(email): Path<String>,
    Json(payload): Json<UpdateUserRolesRequest>,
) -> ApiResult<StatusCode> {
    state
        .executor
        .execute(
            &state.update_user_roles,
            warden_application::UpdateUserRolesRequest {
                email,
                roles: payload.roles,
            },
            access_token.as_ref(),
        )
        .await?;

    Ok(StatusCode::OK)
}
