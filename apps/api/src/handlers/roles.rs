use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};

use aegis_domain::Role;

use crate::dto::RoleBindingResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<Vec<RoleBindingResponse>>> {
    let role = Role::from_str(role.as_str())?;
    let bindings = state
        .permission_admin_service
        .role_bindings(role)
        .await?
        .into_iter()
        .map(RoleBindingResponse::from)
        .collect();

    Ok(Json(bindings))
}
