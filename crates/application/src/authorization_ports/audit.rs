use async_trait::async_trait;
use chrono::{DateTime, Utc};

use aegis_core::AppResult;
use aegis_domain::{Action, PermissionAuditLog, Resource};

/// Query parameters for permission audit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionAuditQuery {
    /// Optional user filter.
    pub user_id: Option<String>,
    /// Optional resource filter.
    pub resource: Option<Resource>,
    /// Optional decision filter.
    pub allowed: Option<bool>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
}

impl PermissionAuditQuery {
    /// Returns whether the entry passes every present filter.
    #[must_use]
    pub fn matches(&self, entry: &PermissionAuditLog) -> bool {
        self.user_id
            .as_deref()
            .is_none_or(|user_id| entry.user_id == user_id)
            && self.resource.is_none_or(|resource| entry.resource == resource)
            && self.allowed.is_none_or(|allowed| entry.allowed == allowed)
    }
}

/// Aggregated decision counts for one resource and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionUsage {
    /// Requested resource.
    pub resource: Resource,
    /// Requested action.
    pub action: Action,
    /// All recorded decisions.
    pub total_uses: u64,
    /// Allowed decisions.
    pub allowed_count: u64,
    /// Denied decisions.
    pub denied_count: u64,
    /// Most recent decision timestamp.
    pub last_used_at: DateTime<Utc>,
}

/// Repository port for the append-only permission decision log.
#[async_trait]
pub trait PermissionAuditRepository: Send + Sync {
    /// Appends one decision.
    async fn append_entry(&self, entry: PermissionAuditLog) -> AppResult<()>;

    /// Lists decisions newest first.
    async fn list_entries(&self, query: PermissionAuditQuery)
    -> AppResult<Vec<PermissionAuditLog>>;

    /// Counts allowed decisions the user requested themselves for a
    /// resource and action at or after `since`.
    async fn count_allowed_since(
        &self,
        user_id: &str,
        resource: Resource,
        action: Action,
        since: DateTime<Utc>,
    ) -> AppResult<u32>;

    /// Returns usage ordered by total decisions, most used first.
    async fn usage_summary(&self, limit: usize) -> AppResult<Vec<PermissionUsage>>;
}
