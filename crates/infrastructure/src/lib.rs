//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_permission_audit_repository;
mod in_memory_permission_catalog_repository;
mod in_memory_permission_grant_repository;
mod in_memory_user_role_repository;

pub use in_memory_permission_audit_repository::InMemoryPermissionAuditRepository;
pub use in_memory_permission_catalog_repository::InMemoryPermissionCatalogRepository;
pub use in_memory_permission_grant_repository::InMemoryPermissionGrantRepository;
pub use in_memory_user_role_repository::InMemoryUserRoleRepository;
