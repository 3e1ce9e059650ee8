use aegis_domain::{Action, OwnershipContext, PermissionKey, Resource, Scope};

/// One authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Requesting user.
    pub user_id: String,
    /// Requested resource type.
    pub resource: Resource,
    /// Requested action.
    pub action: Action,
    /// Requested scope; unchecked when absent.
    pub scope: Option<Scope>,
    /// Target instance identifier for the audit trail.
    pub resource_id: Option<String>,
    /// Ownership of the target instance, when known.
    pub ownership: Option<OwnershipContext>,
    /// Client user agent for the audit trail.
    pub user_agent: Option<String>,
    /// Actor evaluating the request on the user's behalf.
    pub requested_by: Option<String>,
}

impl PermissionCheck {
    /// Creates a request without scope or instance details.
    #[must_use]
    pub fn new(user_id: impl Into<String>, resource: Resource, action: Action) -> Self {
        Self {
            user_id: user_id.into(),
            resource,
            action,
            scope: None,
            resource_id: None,
            ownership: None,
            user_agent: None,
            requested_by: None,
        }
    }

    /// Sets the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Sets the target instance identifier.
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Sets the ownership context of the target instance.
    #[must_use]
    pub fn with_ownership(mut self, ownership: OwnershipContext) -> Self {
        self.ownership = Some(ownership);
        self
    }

    /// Sets the client user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Marks the request as evaluated on the user's behalf.
    #[must_use]
    pub fn with_requested_by(mut self, requested_by: impl Into<String>) -> Self {
        self.requested_by = Some(requested_by.into());
        self
    }
}

/// Outcome of one authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    /// Whether the request is authorized.
    pub allowed: bool,
    /// Permission that authorized the request.
    pub matched_permission: Option<PermissionKey>,
    /// Human-readable reason.
    pub reason: String,
}

impl AuthorizationDecision {
    pub(super) fn allow(permission: PermissionKey) -> Self {
        Self {
            allowed: true,
            matched_permission: Some(permission),
            reason: format!("granted by '{permission}'"),
        }
    }

    pub(super) fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            matched_permission: None,
            reason: reason.into(),
        }
    }
}
