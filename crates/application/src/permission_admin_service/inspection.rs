use super::*;

use chrono::Utc;

use aegis_domain::RequestContext;

use crate::{AuthorizationDecision, EffectivePermissions, PermissionCheck};

impl PermissionAdminService {
    /// Resolves another user's effective permissions.
    ///
    /// Actors may always inspect themselves; inspecting others needs
    /// `user:read` at tenant scope.
    pub async fn effective_permissions_for(
        &self,
        actor: &UserIdentity,
        user_id: &str,
    ) -> AppResult<EffectivePermissions> {
        let user_id = normalize_user_id(user_id)?;
        self.require_self_or_user_read(actor, user_id.as_str())
            .await?;

        self.authorization_service
            .effective_permissions(user_id.as_str(), Utc::now())
            .await
    }

    /// Evaluates an authorization request on behalf of a user.
    ///
    /// Checks run for another user are tagged with the actor and do not
    /// count toward that user's operation limits.
    pub async fn check_for(
        &self,
        actor: &UserIdentity,
        mut request: PermissionCheck,
        context: RequestContext,
    ) -> AppResult<AuthorizationDecision> {
        request.user_id = normalize_user_id(request.user_id.as_str())?;
        self.require_self_or_user_read(actor, request.user_id.as_str())
            .await?;

        if actor.subject() != request.user_id {
            request = request.with_requested_by(actor.subject());
        }

        self.authorization_service.check(request, context).await
    }

    async fn require_self_or_user_read(
        &self,
        actor: &UserIdentity,
        user_id: &str,
    ) -> AppResult<()> {
        if actor.subject() == user_id {
            return Ok(());
        }

        self.require_tenant_permission(actor, Resource::User, Action::Read)
            .await
    }
}
