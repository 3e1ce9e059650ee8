use aegis_application::{EffectivePermissions, PermissionSource};
use aegis_domain::UserPermissionGrant;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::format_timestamp;

/// Incoming payload for a user permission grant.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-grant-request.ts"
)]
pub struct CreateGrantRequest {
    pub user_id: String,
    pub permission_id: String,
    /// RFC 3339 timestamp.
    pub expires_at: Option<String>,
    pub reason: Option<String>,
}

/// Incoming payload for grant revocation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/revoke-grant-request.ts"
)]
pub struct RevokeGrantRequest {
    pub grant_id: String,
}

/// API representation of a user permission grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/grant-response.ts"
)]
pub struct GrantResponse {
    pub grant_id: String,
    pub user_id: String,
    pub permission_id: String,
    pub granted_by: String,
    pub granted_at: String,
    pub expires_at: Option<String>,
    pub reason: Option<String>,
    pub revoked_at: Option<String>,
    pub revoked_by: Option<String>,
}

impl From<UserPermissionGrant> for GrantResponse {
    fn from(value: UserPermissionGrant) -> Self {
        Self {
            grant_id: value.id.to_string(),
            user_id: value.user_id,
            permission_id: value.permission_id.to_string(),
            granted_by: value.granted_by,
            granted_at: format_timestamp(value.granted_at),
            expires_at: value.expires_at.map(format_timestamp),
            reason: value.reason,
            revoked_at: value.revoked_at.map(format_timestamp),
            revoked_by: value.revoked_by,
        }
    }
}

/// One entry of a user's effective permission set.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permission-response.ts"
)]
pub struct EffectivePermissionResponse {
    pub permission: String,
    pub conditional: bool,
    /// Either `role` or `grant`.
    pub source: &'static str,
    pub role: Option<String>,
    pub grant_id: Option<String>,
    pub expires_at: Option<String>,
}

/// API representation of a user's effective permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub user_id: String,
    pub roles: Vec<String>,
    pub permissions: Vec<EffectivePermissionResponse>,
    pub resolved_at: String,
}

impl From<EffectivePermissions> for EffectivePermissionsResponse {
    fn from(value: EffectivePermissions) -> Self {
        Self {
            user_id: value.user_id,
            roles: value
                .roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            permissions: value
                .entries
                .into_iter()
                .map(|entry| {
                    let permission = entry.permission.key().to_string();
                    let conditional = entry.permission.conditions.is_some();
                    match entry.source {
                        PermissionSource::Role(role) => EffectivePermissionResponse {
                            permission,
                            conditional,
                            source: "role",
                            role: Some(role.as_str().to_owned()),
                            grant_id: None,
                            expires_at: None,
                        },
                        PermissionSource::Grant {
                            grant_id,
                            expires_at,
                        } => EffectivePermissionResponse {
                            permission,
                            conditional,
                            source: "grant",
                            role: None,
                            grant_id: Some(grant_id.to_string()),
                            expires_at: expires_at.map(format_timestamp),
                        },
                    }
                })
                .collect(),
            resolved_at: format_timestamp(value.resolved_at),
        }
    }
}
