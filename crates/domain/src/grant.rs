use std::fmt::{Display, Formatter};
use std::str::FromStr;

use aegis_core::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::PermissionId;
use crate::role::Role;

/// Unique identifier for a user permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrantId(Uuid);

impl GrantId {
    /// Creates a new random grant identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GrantId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GrantId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for GrantId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| {
                AppError::Validation(format!("invalid grant id '{value}': {error}"))
            })
    }
}

/// Explicit grant of one permission to one user outside their roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermissionGrant {
    /// Stable grant identifier.
    pub id: GrantId,
    /// Receiving user.
    pub user_id: String,
    /// Granted permission.
    pub permission_id: PermissionId,
    /// Administrator that issued the grant.
    pub granted_by: String,
    /// Issue timestamp.
    pub granted_at: DateTime<Utc>,
    /// Expiry timestamp; the grant never expires when absent.
    pub expires_at: Option<DateTime<Utc>>,
    /// Justification recorded for audit.
    pub reason: Option<String>,
    /// Revocation timestamp.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Administrator that revoked the grant.
    pub revoked_by: Option<String>,
}

impl UserPermissionGrant {
    /// Returns whether the grant contributes to an effective permission set
    /// at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// Join record associating a role with a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    /// Stable binding identifier.
    pub id: Uuid,
    /// Role receiving the permission.
    pub role_id: Role,
    /// Bound permission.
    pub permission_id: PermissionId,
    /// Role the binding was inherited from, if any.
    pub inherited_from: Option<Role>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
