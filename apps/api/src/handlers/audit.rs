use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Query, State};

use aegis_application::PermissionAuditQuery;
use aegis_core::UserIdentity;
use aegis_domain::Resource;

use crate::dto::{PermissionAuditEntryResponse, PermissionUsageResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::page_limit;

#[derive(Debug, Default, serde::Deserialize)]
pub struct PermissionAuditListQuery {
    pub user_id: Option<String>,
    pub resource: Option<String>,
    pub allowed: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn list_permission_audit_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<PermissionAuditListQuery>,
) -> ApiResult<Json<Vec<PermissionAuditEntryResponse>>> {
    let entries = state
        .permission_admin_service
        .list_audit_log(
            &user,
            PermissionAuditQuery {
                user_id: query.user_id,
                resource: query
                    .resource
                    .as_deref()
                    .map(Resource::from_str)
                    .transpose()?,
                allowed: query.allowed,
                limit: page_limit(query.limit),
                offset: query.offset.unwrap_or(0),
            },
        )
        .await?
        .into_iter()
        .map(PermissionAuditEntryResponse::from)
        .collect();

    Ok(Json(entries))
}

pub async fn permission_stats_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<PermissionUsageResponse>>> {
    let usage = state
        .permission_admin_service
        .permission_usage(&user)
        .await?
        .into_iter()
        .map(PermissionUsageResponse::from)
        .collect();

    Ok(Json(usage))
}
