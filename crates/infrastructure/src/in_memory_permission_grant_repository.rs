use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use aegis_application::{GrantQuery, PermissionGrantRepository};
use aegis_core::{AppError, AppResult};
use aegis_domain::{GrantId, UserPermissionGrant};

/// In-memory explicit grant store.
#[derive(Debug, Default)]
pub struct InMemoryPermissionGrantRepository {
    grants: RwLock<HashMap<GrantId, UserPermissionGrant>>,
}

impl InMemoryPermissionGrantRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(grants: &mut [UserPermissionGrant]) {
    grants.sort_by(|left, right| {
        right
            .granted_at
            .cmp(&left.granted_at)
            .then(left.id.as_uuid().cmp(&right.id.as_uuid()))
    });
}

#[async_trait]
impl PermissionGrantRepository for InMemoryPermissionGrantRepository {
    async fn create_grant(&self, grant: UserPermissionGrant) -> AppResult<()> {
        let mut grants = self.grants.write().await;
        if grants.contains_key(&grant.id) {
            return Err(AppError::Conflict(format!(
                "grant '{}' already exists",
                grant.id
            )));
        }

        grants.insert(grant.id, grant);
        Ok(())
    }

    async fn revoke_grant(
        &self,
        grant_id: GrantId,
        revoked_by: &str,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<UserPermissionGrant> {
        let mut grants = self.grants.write().await;
        let grant = grants
            .get_mut(&grant_id)
            .filter(|grant| grant.revoked_at.is_none())
            .ok_or_else(|| {
                AppError::NotFound(format!("active grant '{grant_id}' does not exist"))
            })?;

        grant.revoked_at = Some(revoked_at);
        grant.revoked_by = Some(revoked_by.to_owned());
        Ok(grant.clone())
    }

    async fn list_active_grants_for_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        let mut grants: Vec<_> = self
            .grants
            .read()
            .await
            .values()
            .filter(|grant| grant.user_id == user_id && grant.is_active_at(now))
            .cloned()
            .collect();
        grants.sort_by(|left, right| left.granted_at.cmp(&right.granted_at));

        Ok(grants)
    }

    async fn list_grants(&self, query: GrantQuery) -> AppResult<Vec<UserPermissionGrant>> {
        let mut grants: Vec<_> = self
            .grants
            .read()
            .await
            .values()
            .filter(|grant| query.matches(grant))
            .cloned()
            .collect();
        newest_first(&mut grants);

        Ok(grants
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }
}
