use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use aegis_core::UserIdentity;
use aegis_domain::Role;

use crate::dto::{EffectivePermissionsResponse, RoleAssignmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn user_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let effective = state
        .permission_admin_service
        .effective_permissions_for(&user, user_id.as_str())
        .await?;

    Ok(Json(EffectivePermissionsResponse::from(effective)))
}

pub async fn list_user_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let assignments = state
        .permission_admin_service
        .list_user_roles(&user, user_id.as_str())
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((user_id, role)): Path<(String, String)>,
) -> ApiResult<(StatusCode, Json<RoleAssignmentResponse>)> {
    let role = Role::from_str(role.as_str())?;
    let assignment = state
        .permission_admin_service
        .assign_role(&user, user_id.as_str(), role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RoleAssignmentResponse::from(assignment)),
    ))
}

pub async fn unassign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((user_id, role)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let role = Role::from_str(role.as_str())?;
    state
        .permission_admin_service
        .unassign_role(&user, user_id.as_str(), role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
