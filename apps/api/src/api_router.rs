use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;
use warden_core::AppError;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/permissions",
            post(handlers::create_permission_handler),
        )
        .route(
            "/permissions/check",
            post(handlers::check_permissions_handler),
        )
        .route("/roles", post(handlers::create_role_handler))
        .route(
            "/user/{email}/permissions",
            put(handlers::update_user_permissions_handler),
        )
        .route(
            "/user/{email}/roles",
            put(handlers::update_user_roles_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_access_token,
        ));

    Ok(Router::new()
        .route("/status", get(handlers::status_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
