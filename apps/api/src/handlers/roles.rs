use super::*;

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(RequestAccessToken(access_token)): Extension<RequestAccessToken>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<StatusCode> {
    state
        .executor
        .execute(
            &state.create_role,
            warden_application::CreateRoleRequest {
                name: payload.name,
                permissions: payload.permissions,
            },
            access_token.as_ref(),
        )
        .await?;

    Ok(StatusCode::CREATED)
}
