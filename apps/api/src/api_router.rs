use aegis_core::AppError;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/v1/permissions",
            get(handlers::permissions::list_permissions_handler)
                .post(handlers::permissions::create_permission_handler),
        )
        .route(
            "/api/v1/permissions/check",
            post(handlers::permissions::check_permission_handler),
        )
        .route(
            "/api/v1/permissions/grant",
            post(handlers::grants::create_grant_handler),
        )
        .route(
            "/api/v1/permissions/revoke",
            post(handlers::grants::revoke_grant_handler),
        )
        .route(
            "/api/v1/permissions/grants",
            get(handlers::grants::list_grants_handler),
        )
        .route(
            "/api/v1/users/{user_id}/permissions",
            get(handlers::users::user_permissions_handler),
        )
        .route(
            "/api/v1/users/{user_id}/roles",
            get(handlers::users::list_user_roles_handler),
        )
        .route(
            "/api/v1/users/{user_id}/roles/{role}",
            put(handlers::users::assign_role_handler)
                .delete(handlers::users::unassign_role_handler),
        )
        .route(
            "/api/v1/roles/{role}/permissions",
            get(handlers::roles::role_permissions_handler),
        )
        .route(
            "/api/v1/audit/permissions",
            get(handlers::audit::list_permission_audit_handler),
        )
        .route(
            "/api/v1/stats/permissions",
            get(handlers::audit::permission_stats_handler),
        )
        .route_layer(from_fn(middleware::require_subject));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
