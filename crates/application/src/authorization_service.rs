//! Effective permission assembly and audited authorization decisions.

mod decision;
mod effective;


use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use aegis_core::{AppError, AppResult};
use aegis_domain::{
    Action, Permission, PermissionAuditLog, PermissionCondition, RequestContext, Resource, Scope,
    find_matching_permissions, role_permissions,
};

use crate::authorization_ports::{
    PermissionAuditRepository, PermissionCatalogRepository, PermissionGrantRepository,
    UserRoleRepository,
};

pub use decision::{AuthorizationDecision, PermissionCheck};
pub use effective::{EffectivePermission, EffectivePermissions, PermissionSource};

/// Application service for permission checks.
#[derive(Clone)]
pub struct AuthorizationService {
    role_repository: Arc<dyn UserRoleRepository>,
    grant_repository: Arc<dyn PermissionGrantRepository>,
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    audit_repository: Arc<dyn PermissionAuditRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from repository implementations.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn UserRoleRepository>,
        grant_repository: Arc<dyn PermissionGrantRepository>,
        catalog_repository: Arc<dyn PermissionCatalogRepository>,
        audit_repository: Arc<dyn PermissionAuditRepository>,
    ) -> Self {
        Self {
            role_repository,
            grant_repository,
            catalog_repository,
            audit_repository,
        }
    }

    /// Resolves a user's effective permissions at `now`.
    ///
    /// Grants that are revoked, expired at `now`, or point at an unknown
    /// permission record contribute nothing.
    pub async fn effective_permissions(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<EffectivePermissions> {
        let roles: Vec<_> = self
            .role_repository
            .list_role_assignments(user_id)
            .await?
            .into_iter()
            .map(|assignment| assignment.role)
            .collect();

        let mut entries: Vec<EffectivePermission> = roles
            .iter()
            .flat_map(|role| {
                let role = *role;
                role_permissions(role)
                    .iter()
                    .map(move |key| EffectivePermission {
                        permission: Permission::from(*key),
                        source: PermissionSource::Role(role),
                    })
            })
            .collect();

        let grants = self
            .grant_repository
            .list_active_grants_for_user(user_id, now)
            .await?;

        for grant in grants.into_iter().filter(|grant| grant.is_active_at(now)) {
            match self
                .catalog_repository
                .find_permission(grant.permission_id)
                .await?
            {
                Some(record) => entries.push(EffectivePermission {
                    permission: record.permission,
                    source: PermissionSource::Grant {
                        grant_id: grant.id,
                        expires_at: grant.expires_at,
                    },
                }),
                None => warn!(
                    grant_id = %grant.id,
                    permission_id = %grant.permission_id,
                    "skipping grant that references an unknown permission"
                ),
            }
        }

        Ok(EffectivePermissions {
            user_id: user_id.to_owned(),
            roles,
            entries,
            resolved_at: now,
        })
    }

    /// Evaluates one request and appends the decision to the audit log.
    ///
    /// The first matching permission whose conditions hold authorizes the
    /// request. When the request names an ownership context only matching
    /// permissions whose scope reaches the instance are considered.
    pub async fn check(
        &self,
        request: PermissionCheck,
        context: RequestContext,
    ) -> AppResult<AuthorizationDecision> {
        let effective = self
            .effective_permissions(request.user_id.as_str(), context.now)
            .await?;
        let permissions = effective.permissions();

        let decision = self.decide(&request, &permissions, context.clone()).await?;
        self.record_decision(&request, &decision, &context).await;

        Ok(decision)
    }

    /// Evaluates one request and fails with `AppError::Forbidden` on deny.
    pub async fn require(
        &self,
        request: PermissionCheck,
        context: RequestContext,
    ) -> AppResult<AuthorizationDecision> {
        let user_id = request.user_id.clone();
        let resource = request.resource;
        let action = request.action;
        let decision = self.check(request, context).await?;

        if decision.allowed {
            return Ok(decision);
        }

        Err(AppError::Forbidden(format!(
            "subject '{user_id}' may not {action} '{resource}': {}",
            decision.reason
        )))
    }

    /// Ensures a subject holds a permission at the given scope right now.
    pub async fn require_permission(
        &self,
        subject: &str,
        resource: Resource,
        action: Action,
        scope: Scope,
    ) -> AppResult<()> {
        self.require(
            PermissionCheck::new(subject, resource, action).with_scope(scope),
            RequestContext::at(Utc::now()),
        )
        .await
        .map(|_| ())
    }

    async fn decide(
        &self,
        request: &PermissionCheck,
        permissions: &[Permission],
        mut context: RequestContext,
    ) -> AppResult<AuthorizationDecision> {
        let mut candidates: Vec<&Permission> =
            find_matching_permissions(permissions, request.resource, request.action, request.scope)
                .collect();

        if candidates.is_empty() {
            return Ok(AuthorizationDecision::deny(match request.scope {
                Some(scope) => format!(
                    "no permission grants '{}' on '{}' at scope '{scope}'",
                    request.action, request.resource
                ),
                None => format!(
                    "no permission grants '{}' on '{}'",
                    request.action, request.resource
                ),
            }));
        }

        if let Some(ownership) = &request.ownership {
            candidates
                .retain(|permission| ownership.reaches(permission.scope, request.user_id.as_str()));
            if candidates.is_empty() {
                return Ok(AuthorizationDecision::deny(format!(
                    "no permission granting '{}' on '{}' reaches the resource instance",
                    request.action, request.resource
                )));
            }
        }

        let rate_limited = candidates.iter().any(|permission| {
            permission
                .conditions
                .as_ref()
                .is_some_and(PermissionCondition::has_rate_limits)
        });
        if rate_limited {
            context.operations_in_last_hour = self
                .count_allowed_since(request, context.now - Duration::hours(1))
                .await?;
            context.operations_in_last_day = self
                .count_allowed_since(request, context.now - Duration::days(1))
                .await?;
        }

        let mut last_violation = None;
        for permission in candidates {
            let outcome = permission
                .conditions
                .as_ref()
                .map_or(Ok(()), |conditions| conditions.evaluate(&context));

            match outcome {
                Ok(()) => return Ok(AuthorizationDecision::allow(permission.key())),
                Err(violation) => last_violation = Some(violation),
            }
        }

        Ok(AuthorizationDecision::deny(last_violation.map_or_else(
            || "conditions not satisfied".to_owned(),
            |violation| violation.to_string(),
        )))
    }

    async fn count_allowed_since(
        &self,
        request: &PermissionCheck,
        since: DateTime<Utc>,
    ) -> AppResult<u32> {
        self.audit_repository
            .count_allowed_since(
                request.user_id.as_str(),
                request.resource,
                request.action,
                since,
            )
            .await
    }

    async fn record_decision(
        &self,
        request: &PermissionCheck,
        decision: &AuthorizationDecision,
        context: &RequestContext,
    ) {
        let entry = PermissionAuditLog {
            id: Uuid::new_v4(),
            user_id: request.user_id.clone(),
            resource: request.resource,
            action: request.action,
            resource_id: request.resource_id.clone(),
            matched_permission: decision.matched_permission,
            allowed: decision.allowed,
            reason: Some(decision.reason.clone()),
            ip_address: context.ip_address.map(|address| address.to_string()),
            user_agent: request.user_agent.clone(),
            requested_by: request.requested_by.clone(),
            timestamp: context.now,
        };

        if let Err(error) = self.audit_repository.append_entry(entry).await {
            warn!(
                user_id = %request.user_id,
                resource = %request.resource,
                action = %request.action,
                %error,
                "failed to record permission decision"
            );
        }
    }
}
