use super::*;

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Extension(RequestAccessToken(access_token)): Extension<RequestAccessToken>,
    Json(payload): Json<CreatePermissionRequest>,
) -> ApiResult<StatusCode> {
    state
        .executor
        .execute(
            &state.create_permission,
            warden_application::CreatePermissionRequest { name: payload.name },
            access_token.as_ref(),
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// Answers whether the token's subject holds every listed permission.
pub async fn check_permissions_handler(
    State(state): State<AppState>,
    Extension(RequestAccessToken(access_token)): Extension<RequestAccessToken>,
    Json(payload): Json<CheckPermissionsRequest>,
) -> ApiResult<Json<CheckPermissionsResponse>> {
    let access_token = access_token.ok_or_else(AppError::authentication_required)?;

    let result = state
        .executor
        .execute(
            &state.check_user_permissions,
            warden_application::CheckUserPermissionsRequest {
                email: access_token.subject().to_owned(),
                permissions: payload.permissions,
            },
            Some(&access_token),
        )
        .await?;

    Ok(Json(CheckPermissionsResponse { result }))
}
