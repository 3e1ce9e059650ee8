use async_trait::async_trait;

use aegis_core::AppResult;
use aegis_domain::{
    Action, Permission, PermissionId, PermissionRecord, Resource, Role, RolePermission, Scope,
};

/// Optional filters for permission record listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionFilter {
    /// Resource filter.
    pub resource: Option<Resource>,
    /// Action filter.
    pub action: Option<Action>,
    /// Scope filter.
    pub scope: Option<Scope>,
}

impl PermissionFilter {
    /// Returns whether the record passes every present filter.
    #[must_use]
    pub fn matches(&self, record: &PermissionRecord) -> bool {
        let permission = &record.permission;
        self.resource.is_none_or(|value| permission.resource == value)
            && self.action.is_none_or(|value| permission.action == value)
            && self.scope.is_none_or(|value| permission.scope == value)
    }
}

/// Role binding joined with the bound permission record.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBinding {
    /// Binding row.
    pub binding: RolePermission,
    /// Bound permission.
    pub permission: PermissionRecord,
}

/// Repository port for persisted permission records and role bindings.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    /// Lists permission records ordered by resource, action and scope.
    async fn list_permissions(&self, filter: PermissionFilter)
    -> AppResult<Vec<PermissionRecord>>;

    /// Finds one permission record by id.
    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<PermissionRecord>>;

    /// Lists the bindings of one role in catalog order.
    async fn list_role_bindings(&self, role: Role) -> AppResult<Vec<RoleBinding>>;

    /// Persists an additional permission record.
    ///
    /// Fails with `AppError::Conflict` when an identical rule already exists.
    async fn create_permission(&self, permission: Permission) -> AppResult<PermissionRecord>;
}
