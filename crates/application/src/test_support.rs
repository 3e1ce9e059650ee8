use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use aegis_core::{AppError, AppResult, UserIdentity};
use aegis_domain::{
    Action, GrantId, Permission, PermissionAuditLog, PermissionId, PermissionRecord, Resource,
    Role, RolePermission, UserPermissionGrant, role_permissions,
};

use crate::{
    AuthorizationService, GrantQuery, PermissionAdminService, PermissionAuditQuery,
    PermissionAuditRepository, PermissionCatalogRepository, PermissionFilter,
    PermissionGrantRepository, PermissionUsage, RoleAssignment, RoleBinding, UserRoleRepository,
};

#[derive(Default)]
pub(crate) struct FakeRoleRepository {
    pub(crate) assignments: Mutex<Vec<RoleAssignment>>,
}

#[async_trait]
impl UserRoleRepository for FakeRoleRepository {
    async fn list_role_assignments(&self, user_id: &str) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn assign_role(&self, assignment: RoleAssignment) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        if assignments
            .iter()
            .any(|stored| stored.user_id == assignment.user_id && stored.role == assignment.role)
        {
            return Err(AppError::Conflict("role already assigned".to_owned()));
        }
        assignments.push(assignment);
        Ok(())
    }

    async fn remove_role(&self, user_id: &str, role: Role) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        let before = assignments.len();
        assignments.retain(|stored| !(stored.user_id == user_id && stored.role == role));
        if assignments.len() == before {
            return Err(AppError::NotFound("role assignment not found".to_owned()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeGrantRepository {
    pub(crate) grants: Mutex<Vec<UserPermissionGrant>>,
}

#[async_trait]
impl PermissionGrantRepository for FakeGrantRepository {
    async fn create_grant(&self, grant: UserPermissionGrant) -> AppResult<()> {
        self.grants.lock().await.push(grant);
        Ok(())
    }

    async fn revoke_grant(
        &self,
        grant_id: GrantId,
        revoked_by: &str,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<UserPermissionGrant> {
        let mut grants = self.grants.lock().await;
        let grant = grants
            .iter_mut()
            .find(|grant| grant.id == grant_id && grant.revoked_at.is_none())
            .ok_or_else(|| AppError::NotFound("grant not found".to_owned()))?;
        grant.revoked_at = Some(revoked_at);
        grant.revoked_by = Some(revoked_by.to_owned());
        Ok(grant.clone())
    }

    async fn list_active_grants_for_user(
        &self,
        user_id: &str,
        _now: DateTime<Utc>,
    ) -> AppResult<Vec<UserPermissionGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .iter()
            .filter(|grant| grant.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_grants(&self, query: GrantQuery) -> AppResult<Vec<UserPermissionGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .iter()
            .filter(|grant| query.matches(grant))
            .cloned()
            .collect())
    }
}

pub(crate) struct FakeCatalogRepository {
    pub(crate) records: Vec<PermissionRecord>,
    pub(crate) created: Mutex<Vec<PermissionRecord>>,
}

impl FakeCatalogRepository {
    pub(crate) fn with_permissions(permissions: Vec<Permission>) -> Self {
        let now = Utc::now();
        Self {
            records: permissions
                .into_iter()
                .map(|permission| PermissionRecord {
                    id: PermissionId::new(),
                    permission,
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
            created: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PermissionCatalogRepository for FakeCatalogRepository {
    async fn list_permissions(
        &self,
        filter: PermissionFilter,
    ) -> AppResult<Vec<PermissionRecord>> {
        let created = self.created.lock().await;
        Ok(self
            .records
            .iter()
            .chain(created.iter())
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<PermissionRecord>> {
        let created = self.created.lock().await;
        Ok(self
            .records
            .iter()
            .chain(created.iter())
            .find(|record| record.id == permission_id)
            .cloned())
    }

    async fn list_role_bindings(&self, role: Role) -> AppResult<Vec<RoleBinding>> {
        Ok(role_permissions(role)
            .iter()
            .filter_map(|key| {
                self.records
                    .iter()
                    .find(|record| record.permission.key() == *key)
            })
            .map(|record| RoleBinding {
                binding: RolePermission {
                    id: Uuid::new_v4(),
                    role_id: role,
                    permission_id: record.id,
                    inherited_from: None,
                    created_at: record.created_at,
                },
                permission: record.clone(),
            })
            .collect())
    }

    async fn create_permission(&self, permission: Permission) -> AppResult<PermissionRecord> {
        let mut created = self.created.lock().await;
        if self
            .records
            .iter()
            .chain(created.iter())
            .any(|record| record.permission == permission)
        {
            return Err(AppError::Conflict("permission already exists".to_owned()));
        }

        let now = Utc::now();
        let record = PermissionRecord {
            id: PermissionId::new(),
            permission,
            created_at: now,
            updated_at: now,
        };
        created.push(record.clone());
        Ok(record)
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) entries: Mutex<Vec<PermissionAuditLog>>,
    pub(crate) fail_appends: bool,
}

#[async_trait]
impl PermissionAuditRepository for FakeAuditRepository {
    async fn append_entry(&self, entry: PermissionAuditLog) -> AppResult<()> {
        if self.fail_appends {
            return Err(AppError::Internal("audit store unavailable".to_owned()));
        }
        self.entries.lock().await.push(entry);
        Ok(())
    }

    async fn list_entries(
        &self,
        query: PermissionAuditQuery,
    ) -> AppResult<Vec<PermissionAuditLog>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .rev()
            .filter(|entry| query.matches(entry))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn count_allowed_since(
        &self,
        user_id: &str,
        resource: Resource,
        action: Action,
        since: DateTime<Utc>,
    ) -> AppResult<u32> {
        let count = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| {
                entry.counts_toward_limits()
                    && entry.user_id == user_id
                    && entry.resource == resource
                    && entry.action == action
                    && entry.timestamp >= since
            })
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn usage_summary(&self, _limit: usize) -> AppResult<Vec<PermissionUsage>> {
        Ok(Vec::new())
    }
}

pub(crate) struct Fixture {
    pub(crate) roles: Arc<FakeRoleRepository>,
    pub(crate) grants: Arc<FakeGrantRepository>,
    pub(crate) catalog: Arc<FakeCatalogRepository>,
    pub(crate) audit: Arc<FakeAuditRepository>,
}

impl Fixture {
    pub(crate) fn new(catalog_permissions: Vec<Permission>) -> Self {
        Self::with_audit(catalog_permissions, FakeAuditRepository::default())
    }

    pub(crate) fn with_failing_audit(catalog_permissions: Vec<Permission>) -> Self {
        Self::with_audit(
            catalog_permissions,
            FakeAuditRepository {
                entries: Mutex::new(Vec::new()),
                fail_appends: true,
            },
        )
    }

    fn with_audit(catalog_permissions: Vec<Permission>, audit: FakeAuditRepository) -> Self {
        Self {
            roles: Arc::new(FakeRoleRepository::default()),
            grants: Arc::new(FakeGrantRepository::default()),
            catalog: Arc::new(FakeCatalogRepository::with_permissions(catalog_permissions)),
            audit: Arc::new(audit),
        }
    }

    pub(crate) fn authorization_service(&self) -> AuthorizationService {
        AuthorizationService::new(
            self.roles.clone(),
            self.grants.clone(),
            self.catalog.clone(),
            self.audit.clone(),
        )
    }

    pub(crate) fn admin_service(&self) -> PermissionAdminService {
        PermissionAdminService::new(
            self.authorization_service(),
            self.roles.clone(),
            self.grants.clone(),
            self.catalog.clone(),
            self.audit.clone(),
        )
    }

    pub(crate) async fn assign(&self, user_id: &str, role: Role) {
        self.roles.assignments.lock().await.push(RoleAssignment {
            user_id: user_id.to_owned(),
            role,
            assigned_by: "test".to_owned(),
            assigned_at: Utc::now(),
        });
    }

    pub(crate) async fn grant(
        &self,
        user_id: &str,
        permission_id: PermissionId,
        expires_at: Option<DateTime<Utc>>,
    ) -> GrantId {
        let id = GrantId::new();
        self.grants.grants.lock().await.push(UserPermissionGrant {
            id,
            user_id: user_id.to_owned(),
            permission_id,
            granted_by: "test".to_owned(),
            granted_at: Utc::now(),
            expires_at,
            reason: None,
            revoked_at: None,
            revoked_by: None,
        });
        id
    }

    pub(crate) fn permission_id(&self, index: usize) -> PermissionId {
        self.catalog
            .records
            .get(index)
            .map(|record| record.id)
            .unwrap_or_else(|| panic!("catalog record {index} should exist"))
    }
}

pub(crate) fn actor(subject: &str) -> UserIdentity {
    UserIdentity::new(subject, subject)
}
