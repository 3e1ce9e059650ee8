use super::*;

use chrono::Utc;
use tracing::info;

use aegis_core::AppError;
use aegis_domain::{GrantId, UserPermissionGrant};

use crate::authorization_ports::{CreateGrantInput, GrantQuery};

impl PermissionAdminService {
    /// Grants one permission record to a user outside their roles.
    pub async fn create_grant(
        &self,
        actor: &UserIdentity,
        input: CreateGrantInput,
    ) -> AppResult<UserPermissionGrant> {
        self.require_tenant_permission(actor, Resource::AccessControl, Action::Manage)
            .await?;

        let user_id = normalize_user_id(input.user_id.as_str())?;
        let now = Utc::now();
        if input.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(AppError::Validation(
                "grant expiry must lie in the future".to_owned(),
            ));
        }

        let record = self
            .catalog_repository
            .find_permission(input.permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission '{}' does not exist", input.permission_id))
            })?;

        let grant = UserPermissionGrant {
            id: GrantId::new(),
            user_id,
            permission_id: record.id,
            granted_by: actor.subject().to_owned(),
            granted_at: now,
            expires_at: input.expires_at,
            reason: input
                .reason
                .map(|reason| reason.trim().to_owned())
                .filter(|reason| !reason.is_empty()),
            revoked_at: None,
            revoked_by: None,
        };
        self.grant_repository.create_grant(grant.clone()).await?;

        info!(
            actor = %actor.subject(),
            grant_id = %grant.id,
            user_id = %grant.user_id,
            permission = %record.permission.key(),
            "created permission grant"
        );
        Ok(grant)
    }

    /// Revokes an active or expired grant.
    pub async fn revoke_grant(
        &self,
        actor: &UserIdentity,
        grant_id: GrantId,
    ) -> AppResult<UserPermissionGrant> {
        self.require_tenant_permission(actor, Resource::AccessControl, Action::Manage)
            .await?;

        let grant = self
            .grant_repository
            .revoke_grant(grant_id, actor.subject(), Utc::now())
            .await?;

        info!(actor = %actor.subject(), %grant_id, "revoked permission grant");
        Ok(grant)
    }

    /// Lists grants newest first.
    pub async fn list_grants(
        &self,
        actor: &UserIdentity,
        mut query: GrantQuery,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        self.require_tenant_permission(actor, Resource::AccessControl, Action::Manage)
            .await?;

        query.user_id = query
            .user_id
            .as_deref()
            .map(normalize_user_id)
            .transpose()?;
        self.grant_repository.list_grants(query).await
    }
}
