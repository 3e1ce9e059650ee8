//! Pure authorization predicates over a flattened permission set.
//!
//! Every function here is total: unknown inputs deny instead of erroring.
//! Callers own audit logging.

use crate::permission::{Action, Permission, Resource, Scope};

/// Returns the permissions that authorize `action` on `resource`.
///
/// A permission matches when its resource is equal, its action is equal or
/// [`Action::Manage`], and, when `scope` is given, its scope is equal or one
/// of the broad scopes ([`Scope::Tenant`], [`Scope::Global`]).
pub fn find_matching_permissions(
    permissions: &[Permission],
    resource: Resource,
    action: Action,
    scope: Option<Scope>,
) -> impl Iterator<Item = &Permission> {
    permissions.iter().filter(move |permission| {
        permission.resource == resource
            && permission.action.satisfies(action)
            && scope.is_none_or(|requested| permission.scope.satisfies(requested))
    })
}

/// Returns whether any permission authorizes `action` on `resource`.
///
/// Omitting `scope` skips the scope check entirely.
#[must_use]
pub fn has_permission(
    permissions: &[Permission],
    resource: Resource,
    action: Action,
    scope: Option<Scope>,
) -> bool {
    find_matching_permissions(permissions, resource, action, scope)
        .next()
        .is_some()
}

/// Returns whether the user can reach a resource instance at all.
///
/// The action is deliberately not considered. Team and project membership is
/// assumed validated by the caller; only the presence of the identifier is
/// checked here.
#[must_use]
pub fn can_access_resource(
    permissions: &[Permission],
    resource: Resource,
    resource_owner_id: &str,
    user_id: &str,
    team_id: Option<&str>,
    project_id: Option<&str>,
) -> bool {
    permissions
        .iter()
        .filter(|permission| permission.resource == resource)
        .any(|permission| {
            scope_reaches(
                permission.scope,
                resource_owner_id,
                user_id,
                team_id,
                project_id,
            )
        })
}

fn scope_reaches(
    scope: Scope,
    resource_owner_id: &str,
    user_id: &str,
    team_id: Option<&str>,
    project_id: Option<&str>,
) -> bool {
    match scope {
        Scope::Own => resource_owner_id == user_id,
        Scope::Team => team_id.is_some(),
        Scope::Project => project_id.is_some(),
        Scope::Tenant | Scope::Global => true,
    }
}

/// Ownership and membership context of one resource instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipContext {
    /// Recorded owner of the instance.
    pub resource_owner_id: String,
    /// Team context established by the caller.
    pub team_id: Option<String>,
    /// Project context established by the caller.
    pub project_id: Option<String>,
}

impl OwnershipContext {
    /// Evaluates [`can_access_resource`] for this instance.
    #[must_use]
    pub fn permits(&self, permissions: &[Permission], resource: Resource, user_id: &str) -> bool {
        can_access_resource(
            permissions,
            resource,
            self.resource_owner_id.as_str(),
            user_id,
            self.team_id.as_deref(),
            self.project_id.as_deref(),
        )
    }

    /// Returns whether a permission at `scope` reaches this instance.
    #[must_use]
    pub fn reaches(&self, scope: Scope, user_id: &str) -> bool {
        scope_reaches(
            scope,
            self.resource_owner_id.as_str(),
            user_id,
            self.team_id.as_deref(),
            self.project_id.as_deref(),
        )
    }
}
