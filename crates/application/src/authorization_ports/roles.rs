use async_trait::async_trait;
use chrono::{DateTime, Utc};

use aegis_core::AppResult;
use aegis_domain::Role;

/// Assignment of one built-in role to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Receiving user.
    pub user_id: String,
    /// Assigned role.
    pub role: Role,
    /// Subject that made the assignment.
    pub assigned_by: String,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Repository port for user role assignments.
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Lists a user's assignments in assignment order.
    async fn list_role_assignments(&self, user_id: &str) -> AppResult<Vec<RoleAssignment>>;

    /// Stores an assignment.
    ///
    /// Fails with `AppError::Conflict` when the user already holds the role.
    async fn assign_role(&self, assignment: RoleAssignment) -> AppResult<()>;

    /// Removes an assignment.
    ///
    /// Fails with `AppError::NotFound` when the user does not hold the role.
    async fn remove_role(&self, user_id: &str, role: Role) -> AppResult<()>;
}
