use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use aegis_application::{PermissionCatalogRepository, PermissionFilter, RoleBinding};
use aegis_core::{AppError, AppResult};
use aegis_domain::{
    Permission, PermissionId, PermissionKey, PermissionRecord, Role, RolePermission,
    role_permissions,
};

#[derive(Debug, Default)]
struct CatalogState {
    records: HashMap<PermissionId, PermissionRecord>,
    role_keys: BTreeMap<PermissionKey, PermissionId>,
    bindings: HashMap<Role, Vec<RolePermission>>,
}

/// In-memory permission catalog.
///
/// Every built-in role entry is stored once as a plain record and bound to
/// its roles in catalog order. Additional records, such as conditional
/// permissions for explicit grants, are created at runtime.
#[derive(Debug, Default)]
pub struct InMemoryPermissionCatalogRepository {
    state: RwLock<CatalogState>,
}

impl InMemoryPermissionCatalogRepository {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the built-in role table.
    #[must_use]
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut state = CatalogState::default();

        for role in Role::all() {
            let mut bindings = Vec::new();
            for key in role_permissions(*role) {
                let permission_id = *state.role_keys.entry(*key).or_insert_with(|| {
                    let record = PermissionRecord {
                        id: PermissionId::new(),
                        permission: Permission::from(*key),
                        created_at: now,
                        updated_at: now,
                    };
                    let id = record.id;
                    state.records.insert(id, record);
                    id
                });

                bindings.push(RolePermission {
                    id: Uuid::new_v4(),
                    role_id: *role,
                    permission_id,
                    inherited_from: None,
                    created_at: now,
                });
            }
            state.bindings.insert(*role, bindings);
        }

        debug!(
            permissions = state.records.len(),
            "seeded permission catalog from built-in roles"
        );

        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl PermissionCatalogRepository for InMemoryPermissionCatalogRepository {
    async fn list_permissions(
        &self,
        filter: PermissionFilter,
    ) -> AppResult<Vec<PermissionRecord>> {
        let state = self.state.read().await;
        let mut records: Vec<PermissionRecord> = state
            .records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        records.sort_by(|left, right| {
            left.permission
                .key()
                .cmp(&right.permission.key())
                .then(left.created_at.cmp(&right.created_at))
        });

        Ok(records)
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<PermissionRecord>> {
        Ok(self.state.read().await.records.get(&permission_id).cloned())
    }

    async fn list_role_bindings(&self, role: Role) -> AppResult<Vec<RoleBinding>> {
        let state = self.state.read().await;
        let Some(bindings) = state.bindings.get(&role) else {
            return Ok(Vec::new());
        };

        bindings
            .iter()
            .map(|binding| {
                state
                    .records
                    .get(&binding.permission_id)
                    .cloned()
                    .map(|permission| RoleBinding {
                        binding: binding.clone(),
                        permission,
                    })
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "role '{role}' is bound to missing permission '{}'",
                            binding.permission_id
                        ))
                    })
            })
            .collect()
    }

    async fn create_permission(&self, permission: Permission) -> AppResult<PermissionRecord> {
        let mut state = self.state.write().await;
        if state
            .records
            .values()
            .any(|record| record.permission == permission)
        {
            return Err(AppError::Conflict(format!(
                "permission '{}' with identical conditions already exists",
                permission.key()
            )));
        }

        let now = Utc::now();
        let record = PermissionRecord {
            id: PermissionId::new(),
            permission,
            created_at: now,
            updated_at: now,
        };
        state.records.insert(record.id, record.clone());

        debug!(
            permission_id = %record.id,
            permission = %record.permission.key(),
            "stored permission record"
        );
        Ok(record)
    }
}
