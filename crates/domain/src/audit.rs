use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::{Action, PermissionKey, Resource};

/// Append-only record of one authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionAuditLog {
    /// Stable entry identifier.
    pub id: Uuid,
    /// User the decision was made for.
    pub user_id: String,
    /// Requested resource type.
    pub resource: Resource,
    /// Requested action.
    pub action: Action,
    /// Target instance, when known.
    pub resource_id: Option<String>,
    /// Permission that authorized the request.
    pub matched_permission: Option<PermissionKey>,
    /// Decision outcome.
    pub allowed: bool,
    /// Human-readable decision reason.
    pub reason: Option<String>,
    /// Client address.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Administrator that ran the check on the user's behalf.
    pub requested_by: Option<String>,
    /// Decision timestamp.
    pub timestamp: DateTime<Utc>,
}

impl PermissionAuditLog {
    /// Returns whether the entry counts toward the user's operation limits.
    ///
    /// Only allowed decisions the user requested themselves are counted.
    #[must_use]
    pub fn counts_toward_limits(&self) -> bool {
        self.allowed && self.requested_by.is_none()
    }
}
