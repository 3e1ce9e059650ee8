use chrono::{Duration, Utc};

use aegis_core::AppError;
use aegis_domain::{
    Action, GrantId, Permission, PermissionAuditLog, PermissionId, Resource, Role, Scope,
};

use crate::test_support::{Fixture, actor};
use crate::{CreateGrantInput, GrantQuery, PermissionAuditQuery, PermissionFilter};

fn grant_input(user_id: &str, permission_id: PermissionId) -> CreateGrantInput {
    CreateGrantInput {
        user_id: user_id.to_owned(),
        permission_id,
        expires_at: Some(Utc::now() + Duration::days(1)),
        reason: Some("  incident response  ".to_owned()),
    }
}

fn audit_query() -> PermissionAuditQuery {
    PermissionAuditQuery {
        user_id: None,
        resource: None,
        allowed: None,
        limit: 50,
        offset: 0,
    }
}

#[tokio::test]
async fn assign_role_requires_role_manage() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("sam", Role::SoftwareEngineer).await;

    let result = fixture
        .admin_service()
        .assign_role(&actor("sam"), "bob", Role::Admin)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(fixture.roles.assignments.lock().await.len(), 1);
}

#[tokio::test]
async fn admin_assigns_and_lists_roles() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;
    let service = fixture.admin_service();
    let admin = actor("root");

    let assignment = service
        .assign_role(&admin, " bob ", Role::ProjectManager)
        .await
        .unwrap_or_else(|_| panic!("assignment should succeed"));
    assert_eq!(assignment.user_id, "bob");
    assert_eq!(assignment.assigned_by, "root");

    let duplicate = service
        .assign_role(&admin, "bob", Role::ProjectManager)
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let roles = service
        .list_user_roles(&admin, "bob")
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));
    assert_eq!(
        roles.iter().map(|value| value.role).collect::<Vec<_>>(),
        vec![Role::ProjectManager]
    );
}

#[tokio::test]
async fn unassign_missing_role_is_not_found() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;

    let result = fixture
        .admin_service()
        .unassign_role(&actor("root"), "bob", Role::Consultant)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn create_grant_requires_access_control_manage() {
    let fixture = Fixture::new(vec![Permission::new(
        Resource::Deployment,
        Action::Execute,
        Scope::Global,
    )]);
    fixture.assign("pm", Role::ProjectManager).await;

    let result = fixture
        .admin_service()
        .create_grant(&actor("pm"), grant_input("bob", fixture.permission_id(0)))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn create_grant_trims_reason_and_stores_grant() {
    let fixture = Fixture::new(vec![Permission::new(
        Resource::Deployment,
        Action::Execute,
        Scope::Global,
    )]);
    fixture.assign("root", Role::Admin).await;

    let grant = fixture
        .admin_service()
        .create_grant(&actor("root"), grant_input("bob", fixture.permission_id(0)))
        .await
        .unwrap_or_else(|_| panic!("grant should be created"));

    assert_eq!(grant.reason.as_deref(), Some("incident response"));
    assert_eq!(grant.granted_by, "root");
    assert_eq!(fixture.grants.grants.lock().await.len(), 1);
}

#[tokio::test]
async fn create_grant_rejects_past_expiry() {
    let fixture = Fixture::new(vec![Permission::new(
        Resource::Deployment,
        Action::Execute,
        Scope::Global,
    )]);
    fixture.assign("root", Role::Admin).await;
    let mut input = grant_input("bob", fixture.permission_id(0));
    input.expires_at = Some(Utc::now() - Duration::minutes(1));

    let result = fixture
        .admin_service()
        .create_grant(&actor("root"), input)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_grant_rejects_unknown_permission() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;

    let result = fixture
        .admin_service()
        .create_grant(&actor("root"), grant_input("bob", PermissionId::new()))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn revoking_twice_is_not_found() {
    let fixture = Fixture::new(vec![Permission::new(
        Resource::Deployment,
        Action::Execute,
        Scope::Global,
    )]);
    fixture.assign("root", Role::Admin).await;
    let service = fixture.admin_service();
    let admin = actor("root");
    let grant = service
        .create_grant(&admin, grant_input("bob", fixture.permission_id(0)))
        .await
        .unwrap_or_else(|_| panic!("grant should be created"));

    let revoked = service
        .revoke_grant(&admin, grant.id)
        .await
        .unwrap_or_else(|_| panic!("revocation should succeed"));
    assert_eq!(revoked.revoked_by.as_deref(), Some("root"));

    let again = service.revoke_grant(&admin, grant.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    let unknown = service.revoke_grant(&admin, GrantId::new()).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let active = service
        .list_grants(
            &admin,
            GrantQuery {
                user_id: Some("bob".to_owned()),
                active_at: Some(Utc::now()),
                limit: 50,
                offset: 0,
            },
        )
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));
    assert!(active.is_empty());
}

#[tokio::test]
async fn audit_log_requires_audit_read() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("casey", Role::Consultant).await;

    let result = fixture
        .admin_service()
        .list_audit_log(&actor("casey"), audit_query())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn audit_log_lists_gate_decisions_newest_first() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("ea", Role::EnterpriseArchitect).await;
    let service = fixture.admin_service();

    let first = service
        .list_audit_log(&actor("ea"), audit_query())
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));
    assert_eq!(first.len(), 1);

    let second = service
        .list_audit_log(&actor("ea"), audit_query())
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));
    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|entry: &PermissionAuditLog| {
        entry.allowed && entry.resource == Resource::AuditLog
    }));
}

#[tokio::test]
async fn usage_summary_requires_audit_read() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("sam", Role::SoftwareEngineer).await;

    let result = fixture.admin_service().permission_usage(&actor("sam")).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn bootstrap_admin_is_idempotent() {
    let fixture = Fixture::new(Vec::new());
    let service = fixture.admin_service();

    let first = service.bootstrap_admin("root").await;
    let second = service.bootstrap_admin("root").await;

    assert!(matches!(first, Ok(true)));
    assert!(matches!(second, Ok(false)));
    assert_eq!(fixture.roles.assignments.lock().await.len(), 1);
}

#[tokio::test]
async fn catalog_listing_applies_filters() {
    let fixture = Fixture::new(vec![
        Permission::new(Resource::Deployment, Action::Execute, Scope::Global),
        Permission::new(Resource::Deployment, Action::Read, Scope::Project),
        Permission::new(Resource::Blueprint, Action::Read, Scope::Project),
    ]);

    let records = fixture
        .admin_service()
        .list_permissions(PermissionFilter {
            resource: Some(Resource::Deployment),
            action: None,
            scope: Some(Scope::Project),
        })
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].permission.action, Action::Read);
}

#[tokio::test]
async fn actors_may_inspect_themselves() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("casey", Role::Consultant).await;

    let effective = fixture
        .admin_service()
        .effective_permissions_for(&actor("casey"), "casey")
        .await
        .unwrap_or_else(|_| panic!("self inspection should succeed"));

    assert_eq!(effective.entries.len(), 16);
}

#[tokio::test]
async fn inspecting_others_requires_user_read() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("casey", Role::Consultant).await;
    fixture.assign("pm", Role::ProjectManager).await;
    let service = fixture.admin_service();

    let denied = service
        .effective_permissions_for(&actor("casey"), "pm")
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let decision = service
        .check_for(
            &actor("root-less"),
            crate::PermissionCheck::new("casey", Resource::Blueprint, Action::Read),
            aegis_domain::RequestContext::at(Utc::now()),
        )
        .await;
    assert!(matches!(decision, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn admin_checks_on_behalf_of_users() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;
    fixture.assign("casey", Role::Consultant).await;

    let decision = fixture
        .admin_service()
        .check_for(
            &actor("root"),
            crate::PermissionCheck::new("casey", Resource::Blueprint, Action::Read)
                .with_scope(Scope::Project),
            aegis_domain::RequestContext::at(Utc::now()),
        )
        .await
        .unwrap_or_else(|_| panic!("check should succeed"));

    assert!(decision.allowed);
}

#[tokio::test]
async fn user_ids_are_trimmed_at_every_entry_point() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;
    let service = fixture.admin_service();
    let root = actor("root");

    service
        .assign_role(&root, " bob ", Role::Consultant)
        .await
        .unwrap_or_else(|_| panic!("assignment should succeed"));

    let roles = service
        .list_user_roles(&root, "bob  ")
        .await
        .unwrap_or_else(|_| panic!("roles should list"));
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].user_id, "bob");

    let effective = service
        .effective_permissions_for(&root, " bob")
        .await
        .unwrap_or_else(|_| panic!("inspection should succeed"));
    assert_eq!(effective.user_id, "bob");
    assert_eq!(effective.entries.len(), 16);

    let decision = service
        .check_for(
            &root,
            crate::PermissionCheck::new(" bob ", Resource::Blueprint, Action::Read)
                .with_scope(Scope::Project),
            aegis_domain::RequestContext::at(Utc::now()),
        )
        .await
        .unwrap_or_else(|_| panic!("check should succeed"));
    assert!(decision.allowed);

    assert!(
        service
            .unassign_role(&root, " bob ", Role::Consultant)
            .await
            .is_ok()
    );
    let remaining = service
        .list_user_roles(&root, "bob")
        .await
        .unwrap_or_else(|_| panic!("roles should list"));
    assert!(remaining.is_empty());

    let blank = service.list_user_roles(&root, "   ").await;
    assert!(matches!(blank, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn on_behalf_checks_are_tagged_and_spare_user_limits() {
    let limited = Permission::new(Resource::Deployment, Action::Execute, Scope::Global)
        .with_conditions(aegis_domain::PermissionCondition {
            max_operations_per_hour: Some(1),
            ..aegis_domain::PermissionCondition::default()
        });
    let fixture = Fixture::new(vec![limited]);
    fixture.assign("root", Role::Admin).await;
    fixture.grant("bob", fixture.permission_id(0), None).await;
    let service = fixture.admin_service();
    let request = crate::PermissionCheck::new("bob", Resource::Deployment, Action::Execute);

    for _ in 0..2 {
        let inspected = service
            .check_for(
                &actor("root"),
                request.clone(),
                aegis_domain::RequestContext::at(Utc::now()),
            )
            .await
            .unwrap_or_else(|_| panic!("check should succeed"));
        assert!(inspected.allowed);
    }

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let decision = service
            .check_for(
                &actor("bob"),
                request.clone(),
                aegis_domain::RequestContext::at(Utc::now()),
            )
            .await
            .unwrap_or_else(|_| panic!("check should succeed"));
        outcomes.push(decision.allowed);
    }
    assert_eq!(outcomes, vec![true, false]);

    let entries = fixture.audit.entries.lock().await;
    let tagged = entries
        .iter()
        .filter(|entry| entry.user_id == "bob" && entry.requested_by.as_deref() == Some("root"))
        .count();
    assert_eq!(tagged, 2);
}

#[tokio::test]
async fn creating_permissions_requires_access_control() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("pat", Role::ProjectManager).await;

    let denied = fixture
        .admin_service()
        .create_permission(
            &actor("pat"),
            Permission::new(Resource::Deployment, Action::Execute, Scope::Project),
        )
        .await;

    assert!(matches!(denied, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn created_conditional_permission_can_be_granted() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;
    let service = fixture.admin_service();
    let conditional = Permission::new(Resource::Deployment, Action::Execute, Scope::Project)
        .with_conditions(aegis_domain::PermissionCondition {
            mfa_required: true,
            ..aegis_domain::PermissionCondition::default()
        })
        .with_description("   ");

    let record = service
        .create_permission(&actor("root"), conditional.clone())
        .await
        .unwrap_or_else(|_| panic!("permission should be created"));
    assert_eq!(record.permission.description, None);

    let duplicate = service
        .create_permission(&actor("root"), conditional)
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    service
        .create_grant(&actor("root"), grant_input("bob", record.id))
        .await
        .unwrap_or_else(|_| panic!("grant should be created"));

    let request = crate::PermissionCheck::new("bob", Resource::Deployment, Action::Execute)
        .with_scope(Scope::Project);
    let denied = service
        .check_for(
            &actor("bob"),
            request.clone(),
            aegis_domain::RequestContext::at(Utc::now()),
        )
        .await
        .unwrap_or_else(|_| panic!("check should succeed"));
    assert!(!denied.allowed);

    let mut verified = aegis_domain::RequestContext::at(Utc::now());
    verified.mfa_verified = true;
    let allowed = service
        .check_for(&actor("bob"), request, verified)
        .await
        .unwrap_or_else(|_| panic!("check should succeed"));
    assert!(allowed.allowed);
}

#[tokio::test]
async fn created_permission_conditions_are_validated() {
    let fixture = Fixture::new(Vec::new());
    fixture.assign("root", Role::Admin).await;

    let unbounded = Permission::new(Resource::Budget, Action::Approve, Scope::Project)
        .with_conditions(aegis_domain::PermissionCondition {
            max_cost_threshold: Some(f64::NAN),
            ..aegis_domain::PermissionCondition::default()
        });
    let result = fixture
        .admin_service()
        .create_permission(&actor("root"), unbounded)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}
