//! Built-in role to permission matrix.
//!
//! Each role maps to a static slice of permission keys. Nothing here is
//! mutated after start-up.

use std::str::FromStr;

use crate::permission::{Action, Permission, PermissionKey, Resource, Scope};
use crate::role::Role;

const fn entry(resource: Resource, action: Action, scope: Scope) -> PermissionKey {
    PermissionKey::new(resource, action, scope)
}

/// Returns the catalog entries of one role.
#[must_use]
pub fn role_permissions(role: Role) -> &'static [PermissionKey] {
    match role {
        Role::EnterpriseArchitect => ENTERPRISE_ARCHITECT,
        Role::SolutionArchitect => SOLUTION_ARCHITECT,
        Role::TechnicalArchitect => TECHNICAL_ARCHITECT,
        Role::ProjectManager => PROJECT_MANAGER,
        Role::SoftwareEngineer => SOFTWARE_ENGINEER,
        Role::Consultant => CONSULTANT,
        Role::Admin => ADMIN,
    }
}

/// Flattens the catalog entries of every role, preserving role order.
///
/// Duplicate roles and overlapping entries are kept as-is.
#[must_use]
pub fn user_permissions(roles: &[Role]) -> Vec<Permission> {
    roles
        .iter()
        .flat_map(|role| role_permissions(*role).iter().copied().map(Permission::from))
        .collect()
}

/// Flattens catalog entries for role transport values.
///
/// Names that are not a built-in role contribute no permissions.
#[must_use]
pub fn user_permissions_for_names<S: AsRef<str>>(role_names: &[S]) -> Vec<Permission> {
    let roles: Vec<Role> = role_names
        .iter()
        .filter_map(|name| Role::from_str(name.as_ref()).ok())
        .collect();

    user_permissions(&roles)
}

/// Tenant-wide governance, standards, patterns and cost visibility.
static ENTERPRISE_ARCHITECT: &[PermissionKey] = &[
    entry(Resource::Blueprint, Action::Read, Scope::Tenant),
    entry(Resource::Blueprint, Action::Approve, Scope::Tenant),
    entry(Resource::Blueprint, Action::Reject, Scope::Tenant),
    entry(Resource::Blueprint, Action::Validate, Scope::Tenant),
    entry(Resource::Blueprint, Action::Audit, Scope::Tenant),

    entry(Resource::Policy, Action::Create, Scope::Tenant),
    entry(Resource::Policy, Action::Read, Scope::Tenant),
    entry(Resource::Policy, Action::Update, Scope::Tenant),
    entry(Resource::Policy, Action::Delete, Scope::Tenant),
    entry(Resource::Policy, Action::Manage, Scope::Tenant),

    entry(Resource::GovernanceFramework, Action::Create, Scope::Tenant),
    entry(Resource::GovernanceFramework, Action::Read, Scope::Tenant),
    entry(Resource::GovernanceFramework, Action::Update, Scope::Tenant),
    entry(Resource::GovernanceFramework, Action::Manage, Scope::Tenant),

    entry(Resource::ComplianceRule, Action::Create, Scope::Tenant),
    entry(Resource::ComplianceRule, Action::Read, Scope::Tenant),
    entry(Resource::ComplianceRule, Action::Update, Scope::Tenant),
    entry(Resource::ComplianceRule, Action::Delete, Scope::Tenant),
    entry(Resource::ComplianceRule, Action::Validate, Scope::Tenant),

    entry(Resource::Standards, Action::Create, Scope::Tenant),
    entry(Resource::Standards, Action::Read, Scope::Tenant),
    entry(Resource::Standards, Action::Update, Scope::Tenant),
    entry(Resource::Standards, Action::Manage, Scope::Tenant),

    entry(Resource::Pattern, Action::Create, Scope::Tenant),
    entry(Resource::Pattern, Action::Read, Scope::Tenant),
    entry(Resource::Pattern, Action::Update, Scope::Tenant),
    entry(Resource::Pattern, Action::Approve, Scope::Tenant),
    entry(Resource::Pattern, Action::Manage, Scope::Tenant),

    entry(Resource::Architecture, Action::Create, Scope::Tenant),
    entry(Resource::Architecture, Action::Read, Scope::Tenant),
    entry(Resource::Architecture, Action::Update, Scope::Tenant),
    entry(Resource::Architecture, Action::Approve, Scope::Tenant),
    entry(Resource::Architecture, Action::Validate, Scope::Tenant),

    entry(Resource::AuditLog, Action::Read, Scope::Tenant),
    entry(Resource::AuditLog, Action::Export, Scope::Tenant),

    entry(Resource::Costing, Action::Read, Scope::Tenant),
    entry(Resource::CostOptimization, Action::Read, Scope::Tenant),
    entry(Resource::Chargeback, Action::Read, Scope::Tenant),

    entry(Resource::Report, Action::Create, Scope::Tenant),
    entry(Resource::Report, Action::Read, Scope::Tenant),
    entry(Resource::Report, Action::Export, Scope::Tenant),

    entry(Resource::Dashboard, Action::Create, Scope::Tenant),
    entry(Resource::Dashboard, Action::Read, Scope::Tenant),
    entry(Resource::Dashboard, Action::Share, Scope::Tenant),
];

/// Project-level solution design with tenant-wide blueprint and pattern reads.
static SOLUTION_ARCHITECT: &[PermissionKey] = &[
    entry(Resource::Blueprint, Action::Create, Scope::Project),
    entry(Resource::Blueprint, Action::Read, Scope::Tenant),
    entry(Resource::Blueprint, Action::Update, Scope::Project),
    entry(Resource::Blueprint, Action::Delete, Scope::Own),
    entry(Resource::Blueprint, Action::Clone, Scope::Project),
    entry(Resource::Blueprint, Action::Validate, Scope::Project),
    entry(Resource::Blueprint, Action::Share, Scope::Project),

    entry(Resource::Architecture, Action::Create, Scope::Project),
    entry(Resource::Architecture, Action::Read, Scope::Project),
    entry(Resource::Architecture, Action::Update, Scope::Project),
    entry(Resource::Architecture, Action::Validate, Scope::Project),

    entry(Resource::DesignDocument, Action::Create, Scope::Project),
    entry(Resource::DesignDocument, Action::Read, Scope::Project),
    entry(Resource::DesignDocument, Action::Update, Scope::Own),
    entry(Resource::DesignDocument, Action::Share, Scope::Project),

    entry(Resource::TechnicalSpec, Action::Create, Scope::Project),
    entry(Resource::TechnicalSpec, Action::Read, Scope::Project),
    entry(Resource::TechnicalSpec, Action::Update, Scope::Own),
    entry(Resource::TechnicalSpec, Action::Approve, Scope::Project),

    entry(Resource::Pattern, Action::Read, Scope::Tenant),
    entry(Resource::Pattern, Action::Create, Scope::Project),
    entry(Resource::Pattern, Action::Update, Scope::Own),

    entry(Resource::Infrastructure, Action::Create, Scope::Project),
    entry(Resource::Infrastructure, Action::Read, Scope::Project),
    entry(Resource::Infrastructure, Action::Update, Scope::Own),
    entry(Resource::Infrastructure, Action::Validate, Scope::Project),

    entry(Resource::IacCode, Action::Read, Scope::Project),
    entry(Resource::IacCode, Action::Validate, Scope::Project),

    entry(Resource::AiRecommendation, Action::Read, Scope::Project),
    entry(Resource::CostOptimization, Action::Read, Scope::Project),

    entry(Resource::Costing, Action::Read, Scope::Project),
    entry(Resource::Budget, Action::Read, Scope::Project),

    entry(Resource::Monitoring, Action::Read, Scope::Project),
    entry(Resource::HealthCheck, Action::Read, Scope::Project),

    entry(Resource::Report, Action::Create, Scope::Project),
    entry(Resource::Report, Action::Read, Scope::Project),
    entry(Resource::Dashboard, Action::Create, Scope::Own),
    entry(Resource::Dashboard, Action::Read, Scope::Project),
];

/// IaC generation, technical specs and guardrail overrides on own work.
static TECHNICAL_ARCHITECT: &[PermissionKey] = &[
    entry(Resource::Blueprint, Action::Read, Scope::Project),
    entry(Resource::Blueprint, Action::Update, Scope::Project),
    entry(Resource::Blueprint, Action::Validate, Scope::Project),
    entry(Resource::Blueprint, Action::Clone, Scope::Project),

    entry(Resource::IacCode, Action::Create, Scope::Project),
    entry(Resource::IacCode, Action::Read, Scope::Project),
    entry(Resource::IacCode, Action::Update, Scope::Own),
    entry(Resource::IacCode, Action::Delete, Scope::Own),
    entry(Resource::IacCode, Action::Execute, Scope::Project),
    entry(Resource::IacCode, Action::Validate, Scope::Project),
    entry(Resource::IacCode, Action::Export, Scope::Project),

    entry(Resource::TechnicalSpec, Action::Create, Scope::Project),
    entry(Resource::TechnicalSpec, Action::Read, Scope::Project),
    entry(Resource::TechnicalSpec, Action::Update, Scope::Project),
    entry(Resource::TechnicalSpec, Action::Validate, Scope::Project),

    entry(Resource::Policy, Action::Read, Scope::Project),
    entry(Resource::Policy, Action::Override, Scope::Own),

    entry(Resource::Infrastructure, Action::Create, Scope::Project),
    entry(Resource::Infrastructure, Action::Read, Scope::Project),
    entry(Resource::Infrastructure, Action::Update, Scope::Project),
    entry(Resource::Infrastructure, Action::Validate, Scope::Project),

    entry(Resource::Deployment, Action::Read, Scope::Project),
    entry(Resource::Deployment, Action::Create, Scope::Project),
    entry(Resource::Deployment, Action::Update, Scope::Own),
    entry(Resource::Deployment, Action::Validate, Scope::Project),

    entry(Resource::SecurityPolicy, Action::Read, Scope::Project),
    entry(Resource::Vulnerability, Action::Read, Scope::Project),

    entry(Resource::Monitoring, Action::Read, Scope::Project),
    entry(Resource::HealthCheck, Action::Read, Scope::Project),
    entry(Resource::Alert, Action::Read, Scope::Project),

    entry(Resource::Pattern, Action::Read, Scope::Tenant),
    entry(Resource::Pattern, Action::Create, Scope::Own),

    entry(Resource::AiRecommendation, Action::Read, Scope::Project),

    entry(Resource::Report, Action::Create, Scope::Project),
    entry(Resource::Report, Action::Read, Scope::Project),
];

/// Project approvals, budgets, migrations and KPIs.
static PROJECT_MANAGER: &[PermissionKey] = &[
    entry(Resource::Project, Action::Create, Scope::Team),
    entry(Resource::Project, Action::Read, Scope::Project),
    entry(Resource::Project, Action::Update, Scope::Project),
    entry(Resource::Project, Action::Manage, Scope::Project),

    entry(Resource::Blueprint, Action::Read, Scope::Project),
    entry(Resource::Blueprint, Action::Approve, Scope::Project),
    entry(Resource::Blueprint, Action::Reject, Scope::Project),

    entry(Resource::Deployment, Action::Read, Scope::Project),
    entry(Resource::Deployment, Action::Approve, Scope::Project),
    entry(Resource::Deployment, Action::Reject, Scope::Project),

    entry(Resource::Workflow, Action::Create, Scope::Project),
    entry(Resource::Workflow, Action::Read, Scope::Project),
    entry(Resource::Workflow, Action::Update, Scope::Project),
    entry(Resource::Workflow, Action::Manage, Scope::Project),

    entry(Resource::Budget, Action::Create, Scope::Project),
    entry(Resource::Budget, Action::Read, Scope::Project),
    entry(Resource::Budget, Action::Update, Scope::Project),
    entry(Resource::Budget, Action::Approve, Scope::Project),
    entry(Resource::Budget, Action::Manage, Scope::Project),

    entry(Resource::Costing, Action::Read, Scope::Project),
    entry(Resource::Costing, Action::Export, Scope::Project),
    entry(Resource::CostOptimization, Action::Read, Scope::Project),
    entry(Resource::Chargeback, Action::Read, Scope::Project),
    entry(Resource::Invoice, Action::Read, Scope::Project),

    entry(Resource::Migration, Action::Create, Scope::Project),
    entry(Resource::Migration, Action::Read, Scope::Project),
    entry(Resource::Migration, Action::Update, Scope::Project),
    entry(Resource::Migration, Action::Approve, Scope::Project),
    entry(Resource::Migration, Action::Manage, Scope::Project),

    entry(Resource::Kpi, Action::Create, Scope::Project),
    entry(Resource::Kpi, Action::Read, Scope::Project),
    entry(Resource::Kpi, Action::Update, Scope::Project),
    entry(Resource::Kpi, Action::Export, Scope::Project),

    entry(Resource::Report, Action::Create, Scope::Project),
    entry(Resource::Report, Action::Read, Scope::Project),
    entry(Resource::Report, Action::Export, Scope::Project),
    entry(Resource::Report, Action::Share, Scope::Project),

    entry(Resource::Dashboard, Action::Create, Scope::Project),
    entry(Resource::Dashboard, Action::Read, Scope::Project),
    entry(Resource::Dashboard, Action::Share, Scope::Project),

    entry(Resource::Team, Action::Read, Scope::Project),
    entry(Resource::Team, Action::Update, Scope::Project),
    entry(Resource::User, Action::Read, Scope::Project),

    entry(Resource::Monitoring, Action::Read, Scope::Project),
    entry(Resource::HealthCheck, Action::Read, Scope::Project),
    entry(Resource::Incident, Action::Read, Scope::Project),
    entry(Resource::Alert, Action::Read, Scope::Project),
];

/// Deployment execution, monitoring and incident response.
static SOFTWARE_ENGINEER: &[PermissionKey] = &[
    entry(Resource::Deployment, Action::Read, Scope::Project),
    entry(Resource::Deployment, Action::Create, Scope::Project),
    entry(Resource::Deployment, Action::Execute, Scope::Project),
    entry(Resource::Deployment, Action::Update, Scope::Own),
    entry(Resource::Deployment, Action::Validate, Scope::Project),

    entry(Resource::Infrastructure, Action::Read, Scope::Project),
    entry(Resource::Infrastructure, Action::Deploy, Scope::Project),
    entry(Resource::Infrastructure, Action::Update, Scope::Project),

    entry(Resource::IacCode, Action::Read, Scope::Project),
    entry(Resource::IacCode, Action::Execute, Scope::Project),
    entry(Resource::IacCode, Action::Validate, Scope::Project),

    entry(Resource::Blueprint, Action::Read, Scope::Project),
    entry(Resource::Blueprint, Action::Clone, Scope::Project),

    entry(Resource::Monitoring, Action::Read, Scope::Project),
    entry(Resource::Monitoring, Action::Manage, Scope::Project),
    entry(Resource::HealthCheck, Action::Read, Scope::Project),
    entry(Resource::HealthCheck, Action::Execute, Scope::Project),

    entry(Resource::Alert, Action::Read, Scope::Project),
    entry(Resource::Alert, Action::Create, Scope::Project),
    entry(Resource::Alert, Action::Update, Scope::Own),

    entry(Resource::Incident, Action::Create, Scope::Project),
    entry(Resource::Incident, Action::Read, Scope::Project),
    entry(Resource::Incident, Action::Update, Scope::Project),
    entry(Resource::Incident, Action::Manage, Scope::Project),

    entry(Resource::Vulnerability, Action::Read, Scope::Project),
    entry(Resource::Vulnerability, Action::Update, Scope::Project),
    entry(Resource::SecurityPolicy, Action::Read, Scope::Project),

    entry(Resource::Backup, Action::Create, Scope::Project),
    entry(Resource::Backup, Action::Read, Scope::Project),
    entry(Resource::Restore, Action::Execute, Scope::Project),

    entry(Resource::AiRecommendation, Action::Read, Scope::Project),
    entry(Resource::AnomalyDetection, Action::Read, Scope::Project),

    entry(Resource::Costing, Action::Read, Scope::Project),
    entry(Resource::CostOptimization, Action::Read, Scope::Project),

    entry(Resource::Report, Action::Create, Scope::Own),
    entry(Resource::Report, Action::Read, Scope::Project),
    entry(Resource::Dashboard, Action::Read, Scope::Project),
];

/// Advisory read access plus own blueprints and reports.
static CONSULTANT: &[PermissionKey] = &[
    entry(Resource::Blueprint, Action::Create, Scope::Own),
    entry(Resource::Blueprint, Action::Read, Scope::Project),
    entry(Resource::Blueprint, Action::Clone, Scope::Project),

    entry(Resource::Architecture, Action::Read, Scope::Project),
    entry(Resource::DesignDocument, Action::Read, Scope::Project),
    entry(Resource::TechnicalSpec, Action::Read, Scope::Project),

    entry(Resource::Pattern, Action::Read, Scope::Tenant),
    entry(Resource::Pattern, Action::Create, Scope::Own),

    entry(Resource::Costing, Action::Read, Scope::Project),
    entry(Resource::CostOptimization, Action::Read, Scope::Project),

    entry(Resource::AiRecommendation, Action::Read, Scope::Project),

    entry(Resource::Report, Action::Create, Scope::Own),
    entry(Resource::Report, Action::Read, Scope::Project),

    entry(Resource::Policy, Action::Read, Scope::Tenant),
    entry(Resource::ComplianceRule, Action::Read, Scope::Tenant),
    entry(Resource::Standards, Action::Read, Scope::Tenant),
];

/// `manage` across administration, security and core resources.
static ADMIN: &[PermissionKey] = &[
    entry(Resource::Blueprint, Action::Manage, Scope::Global),
    entry(Resource::Deployment, Action::Manage, Scope::Global),
    entry(Resource::Infrastructure, Action::Manage, Scope::Global),
    entry(Resource::IacCode, Action::Manage, Scope::Global),

    entry(Resource::User, Action::Create, Scope::Tenant),
    entry(Resource::User, Action::Read, Scope::Tenant),
    entry(Resource::User, Action::Update, Scope::Tenant),
    entry(Resource::User, Action::Delete, Scope::Tenant),
    entry(Resource::User, Action::Manage, Scope::Tenant),

    entry(Resource::Role, Action::Create, Scope::Tenant),
    entry(Resource::Role, Action::Read, Scope::Tenant),
    entry(Resource::Role, Action::Update, Scope::Tenant),
    entry(Resource::Role, Action::Delete, Scope::Tenant),
    entry(Resource::Role, Action::Manage, Scope::Tenant),

    entry(Resource::Team, Action::Manage, Scope::Tenant),
    entry(Resource::Tenant, Action::Manage, Scope::Global),

    entry(Resource::Settings, Action::Manage, Scope::Global),
    entry(Resource::License, Action::Manage, Scope::Global),
    entry(Resource::Integration, Action::Manage, Scope::Tenant),
    entry(Resource::ApiKey, Action::Manage, Scope::Tenant),
    entry(Resource::Webhook, Action::Manage, Scope::Tenant),

    entry(Resource::SecurityPolicy, Action::Manage, Scope::Tenant),
    entry(Resource::AccessControl, Action::Manage, Scope::Tenant),
    entry(Resource::Secret, Action::Manage, Scope::Tenant),
    entry(Resource::EncryptionKey, Action::Manage, Scope::Tenant),

    entry(Resource::AuditLog, Action::Read, Scope::Global),
    entry(Resource::AuditLog, Action::Export, Scope::Global),
    entry(Resource::ComplianceRule, Action::Manage, Scope::Tenant),

    entry(Resource::Policy, Action::Manage, Scope::Tenant),
    entry(Resource::Pattern, Action::Manage, Scope::Tenant),
    entry(Resource::Architecture, Action::Manage, Scope::Tenant),
    entry(Resource::Budget, Action::Manage, Scope::Tenant),
    entry(Resource::Project, Action::Manage, Scope::Tenant),
    entry(Resource::Workflow, Action::Manage, Scope::Tenant),
    entry(Resource::Dashboard, Action::Manage, Scope::Tenant),
    entry(Resource::Report, Action::Manage, Scope::Tenant),
];
