//! Administration of role assignments, explicit grants and the decision log.

mod audit;
mod catalog;
mod grants;
mod inspection;
mod roles;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use aegis_core::{AppResult, NonEmptyString, UserIdentity};
use aegis_domain::{Action, PermissionRecord, Resource, Role, Scope};

use crate::AuthorizationService;
use crate::authorization_ports::{
    PermissionAuditRepository, PermissionCatalogRepository, PermissionFilter,
    PermissionGrantRepository, RoleBinding, UserRoleRepository,
};

/// Application service for permission administration workflows.
#[derive(Clone)]
pub struct PermissionAdminService {
    authorization_service: AuthorizationService,
    role_repository: Arc<dyn UserRoleRepository>,
    grant_repository: Arc<dyn PermissionGrantRepository>,
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    audit_repository: Arc<dyn PermissionAuditRepository>,
}

impl PermissionAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        role_repository: Arc<dyn UserRoleRepository>,
        grant_repository: Arc<dyn PermissionGrantRepository>,
        catalog_repository: Arc<dyn PermissionCatalogRepository>,
        audit_repository: Arc<dyn PermissionAuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            role_repository,
            grant_repository,
            catalog_repository,
            audit_repository,
        }
    }

    /// Lists persisted permission records.
    pub async fn list_permissions(
        &self,
        filter: PermissionFilter,
    ) -> AppResult<Vec<PermissionRecord>> {
        self.catalog_repository.list_permissions(filter).await
    }

    /// Lists the permission bindings of one built-in role.
    pub async fn role_bindings(&self, role: Role) -> AppResult<Vec<RoleBinding>> {
        self.catalog_repository.list_role_bindings(role).await
    }

    async fn require_tenant_permission(
        &self,
        actor: &UserIdentity,
        resource: Resource,
        action: Action,
    ) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor.subject(), resource, action, Scope::Tenant)
            .await
    }
}

fn normalize_user_id(user_id: &str) -> AppResult<String> {
    NonEmptyString::new(user_id).map(String::from)
}
