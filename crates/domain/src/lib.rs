//! Permission model, built-in role catalog and authorization predicates.

#![forbid(unsafe_code)]

mod audit;
mod catalog;
mod condition;
mod evaluation;
mod grant;
mod permission;
mod permission_string;
mod role;

pub use audit::PermissionAuditLog;
pub use catalog::{role_permissions, user_permissions, user_permissions_for_names};
pub use condition::{
    ConditionViolation, Environment, EnvironmentRestriction, PermissionCondition, RequestContext,
    TimeWindow,
};
pub use evaluation::{
    OwnershipContext, can_access_resource, find_matching_permissions, has_permission,
};
pub use grant::{GrantId, RolePermission, UserPermissionGrant};
pub use permission::{
    Action, Permission, PermissionId, PermissionKey, PermissionRecord, Resource, Scope,
};
pub use permission_string::{
    ParsedPermissionString, format_permission_string, parse_permission_string,
};
pub use role::Role;
