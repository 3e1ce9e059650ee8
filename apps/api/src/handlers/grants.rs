use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use aegis_application::{CreateGrantInput, GrantQuery};
use aegis_core::{AppError, UserIdentity};
use aegis_domain::{GrantId, PermissionId};

use crate::dto::{CreateGrantRequest, GrantResponse, RevokeGrantRequest};
use crate::error::ApiResult;
use crate::state::AppState;

use super::page_limit;

#[derive(Debug, Default, serde::Deserialize)]
pub struct GrantListQuery {
    pub user_id: Option<String>,
    pub active_only: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn create_grant_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateGrantRequest>,
) -> ApiResult<(StatusCode, Json<GrantResponse>)> {
    let expires_at = payload
        .expires_at
        .as_deref()
        .map(|value| {
            DateTime::parse_from_rfc3339(value)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|error| {
                    AppError::Validation(format!("invalid expires_at '{value}': {error}"))
                })
        })
        .transpose()?;

    let grant = state
        .permission_admin_service
        .create_grant(
            &user,
            CreateGrantInput {
                user_id: payload.user_id,
                permission_id: PermissionId::from_str(payload.permission_id.as_str())?,
                expires_at,
                reason: payload.reason,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(GrantResponse::from(grant))))
}

pub async fn revoke_grant_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<RevokeGrantRequest>,
) -> ApiResult<Json<GrantResponse>> {
    let grant_id = GrantId::from_str(payload.grant_id.as_str())?;
    let grant = state
        .permission_admin_service
        .revoke_grant(&user, grant_id)
        .await?;

    Ok(Json(GrantResponse::from(grant)))
}

pub async fn list_grants_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<GrantListQuery>,
) -> ApiResult<Json<Vec<GrantResponse>>> {
    let grants = state
        .permission_admin_service
        .list_grants(
            &user,
            GrantQuery {
                user_id: query.user_id,
                active_at: query.active_only.unwrap_or(false).then(Utc::now),
                limit: page_limit(query.limit),
                offset: query.offset.unwrap_or(0),
            },
        )
        .await?
        .into_iter()
        .map(GrantResponse::from)
        .collect();

    Ok(Json(grants))
}
