mod audit;
mod catalog;
mod grants;
mod roles;

pub use audit::{PermissionAuditQuery, PermissionAuditRepository, PermissionUsage};
pub use catalog::{PermissionCatalogRepository, PermissionFilter, RoleBinding};
pub use grants::{CreateGrantInput, GrantQuery, PermissionGrantRepository};
pub use roles::{RoleAssignment, UserRoleRepository};
