use super::*;

use aegis_domain::PermissionAuditLog;

use crate::authorization_ports::{PermissionAuditQuery, PermissionUsage};

/// Number of resource and action pairs in the usage summary.
const USAGE_SUMMARY_LIMIT: usize = 50;

impl PermissionAdminService {
    /// Lists recorded authorization decisions newest first.
    pub async fn list_audit_log(
        &self,
        actor: &UserIdentity,
        mut query: PermissionAuditQuery,
    ) -> AppResult<Vec<PermissionAuditLog>> {
        self.require_tenant_permission(actor, Resource::AuditLog, Action::Read)
            .await?;

        query.user_id = query
            .user_id
            .as_deref()
            .map(normalize_user_id)
            .transpose()?;
        self.audit_repository.list_entries(query).await
    }

    /// Summarizes decisions per resource and action, most used first.
    pub async fn permission_usage(&self, actor: &UserIdentity) -> AppResult<Vec<PermissionUsage>> {
        self.require_tenant_permission(actor, Resource::AuditLog, Action::Read)
            .await?;

        self.audit_repository
            .usage_summary(USAGE_SUMMARY_LIMIT)
            .await
    }
}
