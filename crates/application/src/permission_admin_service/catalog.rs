use super::*;

use tracing::info;

use aegis_domain::Permission;

impl PermissionAdminService {
    /// Adds a permission record that can be granted to users.
    ///
    /// Conditions are validated before storage and a blank description is
    /// dropped.
    pub async fn create_permission(
        &self,
        actor: &UserIdentity,
        mut permission: Permission,
    ) -> AppResult<PermissionRecord> {
        self.require_tenant_permission(actor, Resource::AccessControl, Action::Manage)
            .await?;

        if let Some(conditions) = &permission.conditions {
            conditions.validate()?;
        }
        permission.description = permission
            .description
            .map(|description| description.trim().to_owned())
            .filter(|description| !description.is_empty());

        let record = self
            .catalog_repository
            .create_permission(permission)
            .await?;

        info!(
            actor = %actor.subject(),
            permission_id = %record.id,
            permission = %record.permission.key(),
            conditional = record.permission.conditions.is_some(),
            "created permission record"
        );
        Ok(record)
    }
}
