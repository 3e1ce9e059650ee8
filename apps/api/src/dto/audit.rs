use aegis_application::PermissionUsage;
use aegis_domain::PermissionAuditLog;
use serde::Serialize;
use ts_rs::TS;

use super::format_timestamp;

/// API representation of one authorization decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-audit-entry-response.ts"
)]
pub struct PermissionAuditEntryResponse {
    pub entry_id: String,
    pub user_id: String,
    pub resource: String,
    pub action: String,
    pub resource_id: Option<String>,
    pub matched_permission: Option<String>,
    pub allowed: bool,
    pub reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub requested_by: Option<String>,
    pub timestamp: String,
}

impl From<PermissionAuditLog> for PermissionAuditEntryResponse {
    fn from(value: PermissionAuditLog) -> Self {
        Self {
            entry_id: value.id.to_string(),
            user_id: value.user_id,
            resource: value.resource.as_str().to_owned(),
            action: value.action.as_str().to_owned(),
            resource_id: value.resource_id,
            matched_permission: value.matched_permission.map(|key| key.to_string()),
            allowed: value.allowed,
            reason: value.reason,
            ip_address: value.ip_address,
            user_agent: value.user_agent,
            requested_by: value.requested_by,
            timestamp: format_timestamp(value.timestamp),
        }
    }
}

/// Aggregated decisions for one resource and action.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-usage-response.ts"
)]
pub struct PermissionUsageResponse {
    pub resource: String,
    pub action: String,
    #[ts(type = "number")]
    pub total_uses: u64,
    #[ts(type = "number")]
    pub allowed_count: u64,
    #[ts(type = "number")]
    pub denied_count: u64,
    pub last_used_at: String,
}

impl From<PermissionUsage> for PermissionUsageResponse {
    fn from(value: PermissionUsage) -> Self {
        Self {
            resource: value.resource.as_str().to_owned(),
            action: value.action.as_str().to_owned(),
            total_uses: value.total_uses,
            allowed_count: value.allowed_count,
            denied_count: value.denied_count,
            last_used_at: format_timestamp(value.last_used_at),
        }
    }
}
