//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_ports;
mod authorization_service;
mod permission_admin_service;

#[cfg(test)]
mod test_support;

pub use authorization_ports::{
    CreateGrantInput, GrantQuery, PermissionAuditQuery, PermissionAuditRepository,
    PermissionCatalogRepository, PermissionFilter, PermissionGrantRepository, PermissionUsage,
    RoleAssignment, RoleBinding, UserRoleRepository,
};
pub use authorization_service::{
    AuthorizationDecision, AuthorizationService, EffectivePermission, EffectivePermissions,
    PermissionCheck, PermissionSource,
};
pub use permission_admin_service::PermissionAdminService;
