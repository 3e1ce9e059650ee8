use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use aegis_application::{RoleAssignment, UserRoleRepository};
use aegis_core::{AppError, AppResult};
use aegis_domain::Role;

/// In-memory user role assignments.
#[derive(Debug, Default)]
pub struct InMemoryUserRoleRepository {
    assignments: RwLock<HashMap<String, Vec<RoleAssignment>>>,
}

impl InMemoryUserRoleRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryUserRoleRepository {
    async fn list_role_assignments(&self, user_id: &str) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn assign_role(&self, assignment: RoleAssignment) -> AppResult<()> {
        let mut assignments = self.assignments.write().await;
        let held = assignments.entry(assignment.user_id.clone()).or_default();

        if held.iter().any(|stored| stored.role == assignment.role) {
            return Err(AppError::Conflict(format!(
                "user '{}' already holds role '{}'",
                assignment.user_id, assignment.role
            )));
        }

        held.push(assignment);
        Ok(())
    }

    async fn remove_role(&self, user_id: &str, role: Role) -> AppResult<()> {
        let mut assignments = self.assignments.write().await;
        let held = assignments.get_mut(user_id);

        let Some(held) = held.filter(|held| held.iter().any(|stored| stored.role == role)) else {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' does not hold role '{role}'"
            )));
        };

        held.retain(|stored| stored.role != role);
        if held.is_empty() {
            assignments.remove(user_id);
        }
        Ok(())
    }
}
