use super::*;

use chrono::Utc;
use tracing::info;

use aegis_core::AppError;

use crate::authorization_ports::RoleAssignment;

const SYSTEM_SUBJECT: &str = "system";

impl PermissionAdminService {
    /// Assigns a built-in role to a user.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        user_id: &str,
        role: Role,
    ) -> AppResult<RoleAssignment> {
        self.require_tenant_permission(actor, Resource::Role, Action::Manage)
            .await?;

        let assignment = RoleAssignment {
            user_id: normalize_user_id(user_id)?,
            role,
            assigned_by: actor.subject().to_owned(),
            assigned_at: Utc::now(),
        };
        self.role_repository.assign_role(assignment.clone()).await?;

        info!(
            actor = %actor.subject(),
            user_id = %assignment.user_id,
            %role,
            "assigned role"
        );
        Ok(assignment)
    }

    /// Removes a built-in role from a user.
    pub async fn unassign_role(
        &self,
        actor: &UserIdentity,
        user_id: &str,
        role: Role,
    ) -> AppResult<()> {
        self.require_tenant_permission(actor, Resource::Role, Action::Manage)
            .await?;

        let user_id = normalize_user_id(user_id)?;
        self.role_repository
            .remove_role(user_id.as_str(), role)
            .await?;

        info!(actor = %actor.subject(), %user_id, %role, "removed role");
        Ok(())
    }

    /// Lists a user's role assignments.
    pub async fn list_user_roles(
        &self,
        actor: &UserIdentity,
        user_id: &str,
    ) -> AppResult<Vec<RoleAssignment>> {
        self.require_tenant_permission(actor, Resource::Role, Action::Manage)
            .await?;

        self.role_repository
            .list_role_assignments(normalize_user_id(user_id)?.as_str())
            .await
    }

    /// Assigns `Admin` to a configured subject without an actor.
    ///
    /// Returns `false` when the subject already holds the role.
    pub async fn bootstrap_admin(&self, subject: &str) -> AppResult<bool> {
        let assignment = RoleAssignment {
            user_id: normalize_user_id(subject)?,
            role: Role::Admin,
            assigned_by: SYSTEM_SUBJECT.to_owned(),
            assigned_at: Utc::now(),
        };

        match self.role_repository.assign_role(assignment).await {
            Ok(()) => {
                info!(%subject, "bootstrapped admin role");
                Ok(true)
            }
            Err(AppError::Conflict(_)) => Ok(false),
            Err(error) => Err(error),
        }
    }
}
