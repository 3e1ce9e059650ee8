use async_trait::async_trait;
use chrono::{DateTime, Utc};

use aegis_core::AppResult;
use aegis_domain::{GrantId, PermissionId, UserPermissionGrant};

/// Input payload for explicit user grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGrantInput {
    /// Receiving user.
    pub user_id: String,
    /// Granted permission record.
    pub permission_id: PermissionId,
    /// Optional expiry; must lie in the future.
    pub expires_at: Option<DateTime<Utc>>,
    /// Optional justification.
    pub reason: Option<String>,
}

/// Query parameters for grant listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantQuery {
    /// Optional receiving user filter.
    pub user_id: Option<String>,
    /// Only grants active at this instant, when set.
    pub active_at: Option<DateTime<Utc>>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for pagination.
    pub offset: usize,
}

impl GrantQuery {
    /// Returns whether the grant passes every present filter.
    #[must_use]
    pub fn matches(&self, grant: &UserPermissionGrant) -> bool {
        self.user_id
            .as_deref()
            .is_none_or(|user_id| grant.user_id == user_id)
            && self.active_at.is_none_or(|now| grant.is_active_at(now))
    }
}

/// Repository port for explicit user grants.
#[async_trait]
pub trait PermissionGrantRepository: Send + Sync {
    /// Stores a new grant.
    async fn create_grant(&self, grant: UserPermissionGrant) -> AppResult<()>;

    /// Marks a grant revoked and returns the updated grant.
    ///
    /// Fails with `AppError::NotFound` when the grant is unknown or already
    /// revoked.
    async fn revoke_grant(
        &self,
        grant_id: GrantId,
        revoked_by: &str,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<UserPermissionGrant>;

    /// Lists a user's grants that are active at `now`.
    async fn list_active_grants_for_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>>;

    /// Lists grants newest first.
    async fn list_grants(&self, query: GrantQuery) -> AppResult<Vec<UserPermissionGrant>>;
}
