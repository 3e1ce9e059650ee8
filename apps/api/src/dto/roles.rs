use aegis_application::{RoleAssignment, RoleBinding};
use serde::Serialize;
use ts_rs::TS;

use super::{PermissionRecordResponse, format_timestamp};

/// API representation of a user role assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-assignment-response.ts"
)]
pub struct RoleAssignmentResponse {
    pub user_id: String,
    pub role: String,
    pub role_title: String,
    pub assigned_by: String,
    pub assigned_at: String,
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(value: RoleAssignment) -> Self {
        Self {
            user_id: value.user_id,
            role: value.role.as_str().to_owned(),
            role_title: value.role.title().to_owned(),
            assigned_by: value.assigned_by,
            assigned_at: format_timestamp(value.assigned_at),
        }
    }
}

/// API representation of one role-permission binding.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-binding-response.ts"
)]
pub struct RoleBindingResponse {
    pub binding_id: String,
    pub role: String,
    pub inherited_from: Option<String>,
    pub permission: PermissionRecordResponse,
    pub created_at: String,
}

impl From<RoleBinding> for RoleBindingResponse {
    fn from(value: RoleBinding) -> Self {
        Self {
            binding_id: value.binding.id.to_string(),
            role: value.binding.role_id.as_str().to_owned(),
            inherited_from: value
                .binding
                .inherited_from
                .map(|role| role.as_str().to_owned()),
            permission: PermissionRecordResponse::from(value.permission),
            created_at: format_timestamp(value.binding.created_at),
        }
    }
}
