use chrono::{DateTime, Utc};

use aegis_domain::{GrantId, Permission, Role};

/// Origin of one effective permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSource {
    /// Contributed by an assigned role.
    Role(Role),
    /// Contributed by an explicit grant.
    Grant {
        /// Contributing grant.
        grant_id: GrantId,
        /// Grant expiry, when bounded.
        expires_at: Option<DateTime<Utc>>,
    },
}

/// One permission in a user's effective set.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivePermission {
    /// Authorization rule.
    pub permission: Permission,
    /// Where the rule came from.
    pub source: PermissionSource,
}

/// Flattened permission set of one user at one instant.
///
/// Role entries come first in assignment order, followed by grants. Entries
/// are never deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivePermissions {
    /// User the set was resolved for.
    pub user_id: String,
    /// Assigned roles in assignment order.
    pub roles: Vec<Role>,
    /// Effective entries.
    pub entries: Vec<EffectivePermission>,
    /// Instant grant activity was evaluated at.
    pub resolved_at: DateTime<Utc>,
}

impl EffectivePermissions {
    /// Returns the bare permission list fed to the evaluator.
    #[must_use]
    pub fn permissions(&self) -> Vec<Permission> {
        self.entries
            .iter()
            .map(|entry| entry.permission.clone())
            .collect()
    }
}
