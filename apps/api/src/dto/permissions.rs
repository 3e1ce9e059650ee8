use std::collections::BTreeMap;
use std::net::IpAddr;
use std::str::FromStr;

use aegis_core::{AppError, AppResult};
use aegis_domain::{Environment, PermissionCondition, PermissionRecord, RequestContext, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::format_timestamp;

/// API representation of a persisted permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-record-response.ts"
)]
pub struct PermissionRecordResponse {
    pub permission_id: String,
    pub permission: String,
    pub resource: String,
    pub action: String,
    pub scope: String,
    #[ts(type = "unknown")]
    pub conditions: Option<serde_json::Value>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PermissionRecord> for PermissionRecordResponse {
    fn from(value: PermissionRecord) -> Self {
        Self {
            permission_id: value.id.to_string(),
            permission: value.permission.key().to_string(),
            resource: value.permission.resource.as_str().to_owned(),
            action: value.permission.action.as_str().to_owned(),
            scope: value.permission.scope.as_str().to_owned(),
            conditions: value
                .permission
                .conditions
                .and_then(|conditions| serde_json::to_value(conditions).ok()),
            description: value.permission.description,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

/// Incoming payload for a grantable permission record.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-permission-request.ts"
)]
pub struct CreatePermissionRequest {
    pub resource: String,
    pub action: String,
    pub scope: String,
    #[ts(type = "unknown")]
    pub conditions: Option<PermissionCondition>,
    pub description: Option<String>,
}

/// Incoming payload for an authorization check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-request.ts"
)]
pub struct PermissionCheckRequest {
    /// Defaults to the caller.
    pub user_id: Option<String>,
    pub resource: String,
    pub action: String,
    pub scope: Option<String>,
    pub resource_id: Option<String>,
    pub resource_owner_id: Option<String>,
    pub team_id: Option<String>,
    pub project_id: Option<String>,
    #[serde(default)]
    pub context: PermissionCheckContextRequest,
}

/// Request attributes evaluated against permission conditions.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-context-request.ts"
)]
pub struct PermissionCheckContextRequest {
    #[serde(default)]
    pub mfa_verified: bool,
    #[serde(default)]
    pub approved_by: Vec<String>,
    #[serde(default)]
    pub resource_tags: BTreeMap<String, String>,
    pub environment: Option<String>,
    pub ip_address: Option<String>,
    pub cost: Option<f64>,
    pub compliance_score: Option<f64>,
}

impl PermissionCheckContextRequest {
    /// Validates transport values and builds the evaluation context.
    pub fn into_request_context(self, now: DateTime<Utc>) -> AppResult<RequestContext> {
        let ip_address = self
            .ip_address
            .map(|value| {
                IpAddr::from_str(value.trim()).map_err(|error| {
                    AppError::Validation(format!("invalid ip_address '{value}': {error}"))
                })
            })
            .transpose()?;
        let environment = self
            .environment
            .map(|value| Environment::parse(value.as_str()))
            .transpose()?;
        let approved_by = self
            .approved_by
            .iter()
            .map(|value| Role::from_str(value.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut context = RequestContext::at(now);
        context.ip_address = ip_address;
        context.mfa_verified = self.mfa_verified;
        context.approved_by = approved_by;
        context.resource_tags = self.resource_tags;
        context.environment = environment;
        context.cost = self.cost;
        context.compliance_score = self.compliance_score;
        Ok(context)
    }
}

/// API representation of an authorization decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub allowed: bool,
    pub matched_permission: Option<String>,
    pub reason: String,
}

impl From<aegis_application::AuthorizationDecision> for PermissionCheckResponse {
    fn from(value: aegis_application::AuthorizationDecision) -> Self {
        Self {
            allowed: value.allowed,
            matched_permission: value.matched_permission.map(|key| key.to_string()),
            reason: value.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use aegis_core::AppError;
    use aegis_domain::{Environment, Role};
    use chrono::Utc;

    use super::PermissionCheckContextRequest;

    #[test]
    fn context_request_maps_transport_values() {
        let request = PermissionCheckContextRequest {
            mfa_verified: true,
            approved_by: vec!["Admin".to_owned(), "PM".to_owned()],
            environment: Some("production".to_owned()),
            ip_address: Some(" 10.1.2.3 ".to_owned()),
            cost: Some(120.0),
            ..PermissionCheckContextRequest::default()
        };

        let context = request
            .into_request_context(Utc::now())
            .unwrap_or_else(|_| panic!("context should map"));
        assert!(context.mfa_verified);
        assert_eq!(
            context.approved_by,
            vec![Role::Admin, Role::ProjectManager]
        );
        assert_eq!(context.environment, Some(Environment::Production));
        assert_eq!(
            context.ip_address.map(|address| address.to_string()),
            Some("10.1.2.3".to_owned())
        );
        assert_eq!(context.operations_in_last_hour, 0);
    }

    #[test]
    fn context_request_rejects_unknown_values() {
        let bad_ip = PermissionCheckContextRequest {
            ip_address: Some("not-an-ip".to_owned()),
            ..PermissionCheckContextRequest::default()
        };
        assert!(matches!(
            bad_ip.into_request_context(Utc::now()),
            Err(AppError::Validation(_))
        ));

        let bad_role = PermissionCheckContextRequest {
            approved_by: vec!["Intern".to_owned()],
            ..PermissionCheckContextRequest::default()
        };
        assert!(matches!(
            bad_role.into_request_context(Utc::now()),
            Err(AppError::Validation(_))
        ));
    }
}
