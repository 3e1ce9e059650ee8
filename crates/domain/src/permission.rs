use std::fmt::{Display, Formatter};
use std::str::FromStr;

use aegis_core::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::condition::PermissionCondition;
use crate::permission_string::parse_permission_string;

/// Protectable entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    // Core
    /// Infrastructure blueprints.
    Blueprint,
    /// Deployments of blueprints.
    Deployment,
    /// Provisioned infrastructure.
    Infrastructure,
    /// Generated infrastructure-as-code.
    IacCode,

    // Architecture and design
    /// Reusable architecture patterns.
    Pattern,
    /// Architecture definitions.
    Architecture,
    /// Design documents.
    DesignDocument,
    /// Technical specifications.
    TechnicalSpec,

    // Governance and compliance
    /// Guardrail policies.
    Policy,
    /// Compliance rules.
    ComplianceRule,
    /// Governance frameworks.
    GovernanceFramework,
    /// Audit log entries.
    AuditLog,
    /// Engineering standards.
    Standards,

    // Cost and financial
    /// Cost estimates and actuals.
    Costing,
    /// Budgets.
    Budget,
    /// Cost optimization findings.
    CostOptimization,
    /// Chargeback statements.
    Chargeback,
    /// Invoices.
    Invoice,

    // Security
    /// Security policies.
    SecurityPolicy,
    /// Vulnerability findings.
    Vulnerability,
    /// Stored secrets.
    Secret,
    /// Access control configuration.
    AccessControl,
    /// Encryption keys.
    EncryptionKey,

    // Operations
    /// Incidents.
    Incident,
    /// Alerts.
    Alert,
    /// Monitoring configuration.
    Monitoring,
    /// Health checks.
    HealthCheck,
    /// Backups.
    Backup,
    /// Restore operations.
    Restore,

    // Project management
    /// Projects.
    Project,
    /// Migrations.
    Migration,
    /// Key performance indicators.
    Kpi,
    /// Reports.
    Report,
    /// Dashboards.
    Dashboard,
    /// Approval and automation workflows.
    Workflow,

    // AI and ML
    /// AI-generated recommendations.
    AiRecommendation,
    /// Machine learning models.
    MlModel,
    /// Model predictions.
    Prediction,
    /// Anomaly detection results.
    AnomalyDetection,

    // Integrations
    /// Third-party integrations.
    Integration,
    /// Outbound webhooks.
    Webhook,
    /// API keys.
    ApiKey,

    // Administration
    /// User accounts.
    User,
    /// Roles.
    Role,
    /// Teams.
    Team,
    /// Tenants.
    Tenant,
    /// System settings.
    Settings,
    /// Product licenses.
    License,
}

impl Resource {
    /// Returns the stable transport value for this resource.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blueprint => "blueprint",
            Self::Deployment => "deployment",
            Self::Infrastructure => "infrastructure",
            Self::IacCode => "iac_code",
            Self::Pattern => "pattern",
            Self::Architecture => "architecture",
            Self::DesignDocument => "design_document",
            Self::TechnicalSpec => "technical_spec",
            Self::Policy => "policy",
            Self::ComplianceRule => "compliance_rule",
            Self::GovernanceFramework => "governance_framework",
            Self::AuditLog => "audit_log",
            Self::Standards => "standards",
            Self::Costing => "costing",
            Self::Budget => "budget",
            Self::CostOptimization => "cost_optimization",
            Self::Chargeback => "chargeback",
            Self::Invoice => "invoice",
            Self::SecurityPolicy => "security_policy",
            Self::Vulnerability => "vulnerability",
            Self::Secret => "secret",
            Self::AccessControl => "access_control",
            Self::EncryptionKey => "encryption_key",
            Self::Incident => "incident",
            Self::Alert => "alert",
            Self::Monitoring => "monitoring",
            Self::HealthCheck => "health_check",
            Self::Backup => "backup",
            Self::Restore => "restore",
            Self::Project => "project",
            Self::Migration => "migration",
            Self::Kpi => "kpi",
            Self::Report => "report",
            Self::Dashboard => "dashboard",
            Self::Workflow => "workflow",
            Self::AiRecommendation => "ai_recommendation",
            Self::MlModel => "ml_model",
            Self::Prediction => "prediction",
            Self::AnomalyDetection => "anomaly_detection",
            Self::Integration => "integration",
            Self::Webhook => "webhook",
            Self::ApiKey => "api_key",
            Self::User => "user",
            Self::Role => "role",
            Self::Team => "team",
            Self::Tenant => "tenant",
            Self::Settings => "settings",
            Self::License => "license",
        }
    }

    /// Returns all known resources.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Resource] = &[
            Resource::Blueprint,
            Resource::Deployment,
            Resource::Infrastructure,
            Resource::IacCode,
            Resource::Pattern,
            Resource::Architecture,
            Resource::DesignDocument,
            Resource::TechnicalSpec,
            Resource::Policy,
            Resource::ComplianceRule,
            Resource::GovernanceFramework,
            Resource::AuditLog,
            Resource::Standards,
            Resource::Costing,
            Resource::Budget,
            Resource::CostOptimization,
            Resource::Chargeback,
            Resource::Invoice,
            Resource::SecurityPolicy,
            Resource::Vulnerability,
            Resource::Secret,
            Resource::AccessControl,
            Resource::EncryptionKey,
            Resource::Incident,
            Resource::Alert,
            Resource::Monitoring,
            Resource::HealthCheck,
            Resource::Backup,
            Resource::Restore,
            Resource::Project,
            Resource::Migration,
            Resource::Kpi,
            Resource::Report,
            Resource::Dashboard,
            Resource::Workflow,
            Resource::AiRecommendation,
            Resource::MlModel,
            Resource::Prediction,
            Resource::AnomalyDetection,
            Resource::Integration,
            Resource::Webhook,
            Resource::ApiKey,
            Resource::User,
            Resource::Role,
            Resource::Team,
            Resource::Tenant,
            Resource::Settings,
            Resource::License,
        ];

        ALL
    }
}

impl Display for Resource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown resource '{value}'")))
    }
}

/// Verbs that can be attempted on a resource.
///
/// [`Action::Manage`] is a wildcard: a permission carrying it satisfies any
/// other action on the same resource and scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new instance.
    Create,
    /// Read an instance.
    Read,
    /// Modify an instance.
    Update,
    /// Delete an instance.
    Delete,
    /// Approve a pending change.
    Approve,
    /// Reject a pending change.
    Reject,
    /// Execute an operation.
    Execute,
    /// Deploy to a target environment.
    Deploy,
    /// Full control, satisfies every other action.
    Manage,
    /// Override a guardrail decision.
    Override,
    /// Validate against rules.
    Validate,
    /// Audit an instance.
    Audit,
    /// Export data.
    Export,
    /// Import data.
    Import,
    /// Share with other users.
    Share,
    /// Clone an instance.
    Clone,
}

impl Action {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Execute => "execute",
            Self::Deploy => "deploy",
            Self::Manage => "manage",
            Self::Override => "override",
            Self::Validate => "validate",
            Self::Audit => "audit",
            Self::Export => "export",
            Self::Import => "import",
            Self::Share => "share",
            Self::Clone => "clone",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::Approve,
            Action::Reject,
            Action::Execute,
            Action::Deploy,
            Action::Manage,
            Action::Override,
            Action::Validate,
            Action::Audit,
            Action::Export,
            Action::Import,
            Action::Share,
            Action::Clone,
        ];

        ALL
    }

    /// Returns whether a permission carrying `self` authorizes `requested`.
    #[must_use]
    pub fn satisfies(&self, requested: Action) -> bool {
        *self == requested || *self == Self::Manage
    }
}

impl Display for Action {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown action '{value}'")))
    }
}

/// Breadth of applicability of a permission.
///
/// Variants are declared from narrowest to broadest so the derived ordering is
/// `Own < Team < Project < Tenant < Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Resources owned by the requesting user.
    Own,
    /// Resources of the requesting user's team.
    Team,
    /// Resources of the requesting user's project.
    Project,
    /// Every resource in the tenant.
    Tenant,
    /// Every resource across tenants.
    Global,
}

impl Scope {
    /// Returns the stable transport value for this scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Team => "team",
            Self::Project => "project",
            Self::Tenant => "tenant",
            Self::Global => "global",
        }
    }

    /// Returns all scopes from narrowest to broadest.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Scope] = &[
            Scope::Own,
            Scope::Team,
            Scope::Project,
            Scope::Tenant,
            Scope::Global,
        ];

        ALL
    }

    /// Returns whether this scope satisfies a request for any other scope.
    #[must_use]
    pub fn is_broad(&self) -> bool {
        matches!(self, Self::Tenant | Self::Global)
    }

    /// Returns whether a permission granted at `self` satisfies `requested`.
    ///
    /// Narrow scopes only satisfy an identical request; they never subsume
    /// each other.
    #[must_use]
    pub fn satisfies(&self, requested: Scope) -> bool {
        *self == requested || self.is_broad()
    }
}

impl Display for Scope {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "own" => Ok(Self::Own),
            "team" => Ok(Self::Team),
            "project" => Ok(Self::Project),
            "tenant" => Ok(Self::Tenant),
            "global" => Ok(Self::Global),
            _ => Err(AppError::Validation(format!("unknown scope '{value}'"))),
        }
    }
}

/// Identity triple of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionKey {
    /// Protected resource type.
    pub resource: Resource,
    /// Permitted action.
    pub action: Action,
    /// Breadth of the grant.
    pub scope: Scope,
}

impl PermissionKey {
    /// Creates a permission key.
    #[must_use]
    pub const fn new(resource: Resource, action: Action, scope: Scope) -> Self {
        Self {
            resource,
            action,
            scope,
        }
    }
}

impl Display for PermissionKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}:{}", self.resource, self.action, self.scope)
    }
}

impl FromStr for PermissionKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_permission_string(value)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "permission '{value}' must have the form resource:action:scope"
                ))
            })?
            .validate()
    }
}

/// Authorization rule evaluated against a requested action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Protected resource type.
    pub resource: Resource,
    /// Permitted action.
    pub action: Action,
    /// Breadth of the grant.
    pub scope: Scope,
    /// Optional refinements that must hold for the permission to be usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PermissionCondition>,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    /// Creates an unconditional permission.
    #[must_use]
    pub fn new(resource: Resource, action: Action, scope: Scope) -> Self {
        Self {
            resource,
            action,
            scope,
            conditions: None,
            description: None,
        }
    }

    /// Attaches conditions to the permission.
    #[must_use]
    pub fn with_conditions(mut self, conditions: PermissionCondition) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Attaches a description to the permission.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the identity triple.
    #[must_use]
    pub fn key(&self) -> PermissionKey {
        PermissionKey::new(self.resource, self.action, self.scope)
    }
}

impl From<PermissionKey> for Permission {
    fn from(value: PermissionKey) -> Self {
        Self::new(value.resource, value.action, value.scope)
    }
}

/// Unique identifier for a persisted permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionId(Uuid);

impl PermissionId {
    /// Creates a new random permission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a permission identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for PermissionId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| {
                AppError::Validation(format!("invalid permission id '{value}': {error}"))
            })
    }
}

/// Persisted permission with a stable identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Stable permission identifier.
    pub id: PermissionId,
    /// Authorization rule.
    pub permission: Permission,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
