//! Optional refinements attached to a permission.
//!
//! Conditions are evaluated separately from the resource/action/scope match.
//! A permission whose conditions are not satisfied by the request context is
//! not usable for that request, even though it matches by identity.

use std::collections::BTreeMap;
use std::net::IpAddr;

use aegis_core::{AppError, AppResult};
use chrono::{DateTime, Utc};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::role::Role;

/// Inclusive time window during which a permission is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a validated time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end < start {
            return Err(AppError::Validation(
                "time window end must not precede its start".to_owned(),
            ));
        }

        Ok(Self { start, end })
    }

    /// Returns the window start.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the window end.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether the instant falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Deployment environment a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Development environment.
    Development,
    /// Staging environment.
    Staging,
    /// Production environment.
    Production,
}

impl Environment {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Parses a transport value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(AppError::Validation(format!(
                "unknown environment '{value}'"
            ))),
        }
    }
}

/// Environment restriction carried by a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentRestriction {
    /// Only development.
    Development,
    /// Only staging.
    Staging,
    /// Only production.
    Production,
    /// Any environment.
    All,
}

impl EnvironmentRestriction {
    /// Returns whether the restriction admits the environment.
    #[must_use]
    pub fn admits(&self, environment: Environment) -> bool {
        matches!(
            (self, environment),
            (Self::All, _)
                | (Self::Development, Environment::Development)
                | (Self::Staging, Environment::Staging)
                | (Self::Production, Environment::Production)
        )
    }
}

/// Refinements that must all hold for a permission to be usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionCondition {
    /// Time window during which the permission is usable.
    pub time_window: Option<TimeWindow>,
    /// Networks a request must originate from.
    pub ip_whitelist: Vec<IpNet>,
    /// Networks a request must not originate from.
    pub ip_blacklist: Vec<IpNet>,
    /// Requires a verified second factor.
    pub mfa_required: bool,
    /// Requires an approval before use.
    pub approval_required: bool,
    /// Roles whose approval counts; empty means any approver.
    pub approval_from: Vec<Role>,
    /// Tags the target resource must carry.
    pub resource_tags: BTreeMap<String, String>,
    /// Environment restriction.
    pub environment: Option<EnvironmentRestriction>,
    /// Maximum allowed operations in the trailing hour.
    pub max_operations_per_hour: Option<u32>,
    /// Maximum allowed operations in the trailing day.
    pub max_operations_per_day: Option<u32>,
    /// Maximum cost a request may carry.
    pub max_cost_threshold: Option<f64>,
    /// Minimum compliance score a request must carry.
    pub min_compliance_score: Option<f64>,
}

/// Request attributes conditions are evaluated against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Evaluation instant.
    pub now: DateTime<Utc>,
    /// Client address.
    pub ip_address: Option<IpAddr>,
    /// Whether the caller completed a second factor.
    pub mfa_verified: bool,
    /// Roles of the approvers that signed off on the request.
    pub approved_by: Vec<Role>,
    /// Tags on the target resource.
    pub resource_tags: BTreeMap<String, String>,
    /// Target environment.
    pub environment: Option<Environment>,
    /// Allowed operations already recorded in the trailing hour.
    pub operations_in_last_hour: u32,
    /// Allowed operations already recorded in the trailing day.
    pub operations_in_last_day: u32,
    /// Cost attached to the request.
    pub cost: Option<f64>,
    /// Compliance score attached to the request.
    pub compliance_score: Option<f64>,
}

impl RequestContext {
    /// Creates an empty context evaluated at `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }
}

/// Reason a condition rejected a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionViolation {
    /// Evaluation instant falls outside the time window.
    #[error("request is outside the permitted time window")]
    OutsideTimeWindow,
    /// Client address is on the deny list.
    #[error("client address is blocked")]
    IpBlocked,
    /// Client address is missing or not on the allow list.
    #[error("client address is not allowed")]
    IpNotAllowed,
    /// Second factor is required.
    #[error("multi-factor authentication is required")]
    MfaRequired,
    /// Approval from a permitted role is required.
    #[error("approval is required")]
    ApprovalRequired,
    /// Target resource lacks a required tag value.
    #[error("resource tag '{0}' does not match")]
    ResourceTagMismatch(String),
    /// Target environment is missing or not admitted.
    #[error("environment is not permitted")]
    EnvironmentNotPermitted,
    /// Hourly operation budget is exhausted.
    #[error("hourly operation limit of {0} reached")]
    HourlyLimitReached(u32),
    /// Daily operation budget is exhausted.
    #[error("daily operation limit of {0} reached")]
    DailyLimitReached(u32),
    /// Request cost is missing or above the threshold.
    #[error("cost exceeds threshold of {0}")]
    CostThresholdExceeded(f64),
    /// Compliance score is missing or below the minimum.
    #[error("compliance score below minimum of {0}")]
    ComplianceScoreTooLow(f64),
}

impl PermissionCondition {
    /// Evaluates every present refinement against the request context.
    ///
    /// Absent context values fail closed whenever a refinement needs them.
    pub fn evaluate(&self, context: &RequestContext) -> Result<(), ConditionViolation> {
        if let Some(window) = self.time_window {
            if !window.contains(context.now) {
                return Err(ConditionViolation::OutsideTimeWindow);
            }
        }

        self.evaluate_network(context.ip_address)?;

        if self.mfa_required && !context.mfa_verified {
            return Err(ConditionViolation::MfaRequired);
        }

        if self.approval_required && !self.is_approved(&context.approved_by) {
            return Err(ConditionViolation::ApprovalRequired);
        }

        for (key, expected) in &self.resource_tags {
            if context.resource_tags.get(key) != Some(expected) {
                return Err(ConditionViolation::ResourceTagMismatch(key.clone()));
            }
        }

        if let Some(restriction) = self.environment {
            let admitted = context
                .environment
                .is_some_and(|environment| restriction.admits(environment));
            if !admitted {
                return Err(ConditionViolation::EnvironmentNotPermitted);
            }
        }

        if let Some(limit) = self.max_operations_per_hour {
            if context.operations_in_last_hour >= limit {
                return Err(ConditionViolation::HourlyLimitReached(limit));
            }
        }

        if let Some(limit) = self.max_operations_per_day {
            if context.operations_in_last_day >= limit {
                return Err(ConditionViolation::DailyLimitReached(limit));
            }
        }

        if let Some(max_cost) = self.max_cost_threshold {
            if !context.cost.is_some_and(|cost| cost <= max_cost) {
                return Err(ConditionViolation::CostThresholdExceeded(max_cost));
            }
        }

        if let Some(min_score) = self.min_compliance_score {
            if !context
                .compliance_score
                .is_some_and(|score| score >= min_score)
            {
                return Err(ConditionViolation::ComplianceScoreTooLow(min_score));
            }
        }

        Ok(())
    }

    /// Returns whether the condition limits operation counts.
    #[must_use]
    pub fn has_rate_limits(&self) -> bool {
        self.max_operations_per_hour.is_some() || self.max_operations_per_day.is_some()
    }

    /// Rejects refinements decoded from untrusted input that can never be
    /// evaluated consistently.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(window) = self.time_window {
            TimeWindow::new(window.start, window.end)?;
        }

        if self.max_cost_threshold.is_some_and(|value| !value.is_finite()) {
            return Err(AppError::Validation(
                "max_cost_threshold must be a finite number".to_owned(),
            ));
        }
        if self.min_compliance_score.is_some_and(|value| !value.is_finite()) {
            return Err(AppError::Validation(
                "min_compliance_score must be a finite number".to_owned(),
            ));
        }

        Ok(())
    }

    fn evaluate_network(&self, ip_address: Option<IpAddr>) -> Result<(), ConditionViolation> {
        if self.ip_blacklist.is_empty() && self.ip_whitelist.is_empty() {
            return Ok(());
        }

        let Some(address) = ip_address else {
            return Err(ConditionViolation::IpNotAllowed);
        };

        if self
            .ip_blacklist
            .iter()
            .any(|network| network.contains(&address))
        {
            return Err(ConditionViolation::IpBlocked);
        }

        if !self.ip_whitelist.is_empty()
            && !self
                .ip_whitelist
                .iter()
                .any(|network| network.contains(&address))
        {
            return Err(ConditionViolation::IpNotAllowed);
        }

        Ok(())
    }

    fn is_approved(&self, approved_by: &[Role]) -> bool {
        if self.approval_from.is_empty() {
            return !approved_by.is_empty();
        }

        approved_by
            .iter()
            .any(|role| self.approval_from.contains(role))
    }
}
