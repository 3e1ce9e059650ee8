//! Colon-delimited `resource:action:scope` encoding of permissions.

use std::str::FromStr;

use aegis_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::permission::{Action, Permission, PermissionKey, Resource, Scope};

/// Encodes a permission as `resource:action:scope`.
#[must_use]
pub fn format_permission_string(permission: &Permission) -> String {
    permission.key().to_string()
}

/// Raw tokens of a permission string.
///
/// Tokens are not checked against the closed enumerations; use
/// [`ParsedPermissionString::validate`] before trusting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPermissionString {
    /// Resource token.
    pub resource: String,
    /// Action token.
    pub action: String,
    /// Scope token.
    pub scope: String,
}

impl ParsedPermissionString {
    /// Validates every token and returns the typed permission key.
    pub fn validate(&self) -> AppResult<PermissionKey> {
        Ok(PermissionKey::new(
            Resource::from_str(self.resource.as_str())?,
            Action::from_str(self.action.as_str())?,
            Scope::from_str(self.scope.as_str())?,
        ))
    }
}

/// Splits a permission string into its three tokens.
///
/// Returns `None` unless the input has exactly three colon-separated parts.
#[must_use]
pub fn parse_permission_string(value: &str) -> Option<ParsedPermissionString> {
    let mut parts = value.split(':');
    let (Some(resource), Some(action), Some(scope), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    Some(ParsedPermissionString {
        resource: resource.to_owned(),
        action: action.to_owned(),
        scope: scope.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use crate::permission::{Action, Permission, PermissionKey, Resource, Scope};

    use super::{ParsedPermissionString, format_permission_string, parse_permission_string};

    #[test]
    fn formats_colon_delimited_triple() {
        let permission = Permission::new(Resource::IacCode, Action::Execute, Scope::Project);
        assert_eq!(
            format_permission_string(&permission),
            "iac_code:execute:project"
        );
    }

    #[test]
    fn parse_reverses_format() {
        let permission = Permission::new(Resource::AuditLog, Action::Export, Scope::Global);
        let parsed = parse_permission_string(&format_permission_string(&permission));

        assert_eq!(
            parsed,
            Some(ParsedPermissionString {
                resource: "audit_log".to_owned(),
                action: "export".to_owned(),
                scope: "global".to_owned(),
            })
        );
        assert!(matches!(
            parsed.map(|value| value.validate()),
            Some(Ok(key)) if key == permission.key()
        ));
    }

    #[test]
    fn wrong_part_count_is_rejected() {
        assert_eq!(parse_permission_string("not:valid"), None);
        assert_eq!(parse_permission_string("a:b:c:d"), None);
        assert_eq!(parse_permission_string(""), None);
    }

    #[test]
    fn parse_does_not_validate_members() {
        let parsed = parse_permission_string("a:b:c");
        assert_eq!(
            parsed,
            Some(ParsedPermissionString {
                resource: "a".to_owned(),
                action: "b".to_owned(),
                scope: "c".to_owned(),
            })
        );
        assert!(parsed.is_some_and(|value| value.validate().is_err()));
    }

    #[test]
    fn validate_accepts_known_members() {
        let parsed = parse_permission_string("user:manage:tenant");
        let key = parsed.map(|value| value.validate());
        let expected = PermissionKey::new(Resource::User, Action::Manage, Scope::Tenant);
        assert!(matches!(key, Some(Ok(value)) if value == expected));
    }
}
