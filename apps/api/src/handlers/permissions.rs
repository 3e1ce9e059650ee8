use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;

use aegis_application::{PermissionCheck, PermissionFilter};
use aegis_core::{AppError, AppResult, UserIdentity};
use aegis_domain::{Action, OwnershipContext, Permission, Resource, Scope};

use crate::dto::{
    CreatePermissionRequest, PermissionCheckRequest, PermissionCheckResponse,
    PermissionRecordResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, serde::Deserialize)]
pub struct PermissionListQuery {
    pub resource: Option<String>,
    pub action: Option<String>,
    pub scope: Option<String>,
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Query(query): Query<PermissionListQuery>,
) -> ApiResult<Json<Vec<PermissionRecordResponse>>> {
    let filter = PermissionFilter {
        resource: query
            .resource
            .as_deref()
            .map(Resource::from_str)
            .transpose()?,
        action: query.action.as_deref().map(Action::from_str).transpose()?,
        scope: query.scope.as_deref().map(Scope::from_str).transpose()?,
    };

    let permissions = state
        .permission_admin_service
        .list_permissions(filter)
        .await?
        .into_iter()
        .map(PermissionRecordResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionRecordResponse>)> {
    let mut permission = Permission::new(
        Resource::from_str(payload.resource.as_str())?,
        Action::from_str(payload.action.as_str())?,
        Scope::from_str(payload.scope.as_str())?,
    );
    permission.conditions = payload.conditions;
    permission.description = payload.description;

    let record = state
        .permission_admin_service
        .create_permission(&user, permission)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PermissionRecordResponse::from(record)),
    ))
}

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    headers: HeaderMap,
    Json(payload): Json<PermissionCheckRequest>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let resource = Resource::from_str(payload.resource.as_str())?;
    let action = Action::from_str(payload.action.as_str())?;
    let user_id = payload
        .user_id
        .unwrap_or_else(|| user.subject().to_owned());

    let mut request = PermissionCheck::new(user_id, resource, action);
    if let Some(scope) = payload.scope.as_deref() {
        request = request.with_scope(Scope::from_str(scope)?);
    }
    if let Some(resource_id) = payload.resource_id {
        request = request.with_resource_id(resource_id);
    }
    if let Some(ownership) =
        ownership_context(payload.resource_owner_id, payload.team_id, payload.project_id)?
    {
        request = request.with_ownership(ownership);
    }
    if let Some(user_agent) = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
    {
        request = request.with_user_agent(user_agent);
    }

    let context = payload.context.into_request_context(Utc::now())?;
    let decision = state
        .permission_admin_service
        .check_for(&user, request, context)
        .await?;

    Ok(Json(PermissionCheckResponse::from(decision)))
}

fn ownership_context(
    resource_owner_id: Option<String>,
    team_id: Option<String>,
    project_id: Option<String>,
) -> AppResult<Option<OwnershipContext>> {
    match resource_owner_id {
        Some(resource_owner_id) => Ok(Some(OwnershipContext {
            resource_owner_id,
            team_id,
            project_id,
        })),
        None if team_id.is_some() || project_id.is_some() => Err(AppError::Validation(
            "team_id and project_id require resource_owner_id".to_owned(),
        )),
        None => Ok(None),
    }
}
