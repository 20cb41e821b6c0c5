use super::*;

pub async fn status_handler(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<HealthResponse>)> {
    let health = state
        .executor
        .execute(&state.get_application_health, (), None)
        .await?;

    let http_status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((http_status, Json(HealthResponse::from(health))))
}
