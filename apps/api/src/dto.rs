mod audit;
mod common;
mod grants;
pub(crate) mod permissions;
mod roles;

pub use audit::{PermissionAuditEntryResponse, PermissionUsageResponse};
pub use common::HealthResponse;
pub use grants::{
    CreateGrantRequest, EffectivePermissionsResponse, GrantResponse, RevokeGrantRequest,
};
pub use permissions::{
    CreatePermissionRequest, PermissionCheckRequest, PermissionCheckResponse,
    PermissionRecordResponse,
};
pub use roles::{RoleAssignmentResponse, RoleBindingResponse};

fn format_timestamp(value: chrono::DateTime<chrono::Utc>) -> String {
    value.to_rfc3339()
}
