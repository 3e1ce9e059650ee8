use std::fmt::{Display, Formatter};
use std::str::FromStr;

use aegis_core::AppError;
use serde::{Deserialize, Serialize};

/// Built-in role categories with a fixed permission bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Governance, standards, compliance and strategy.
    #[serde(rename = "EA")]
    EnterpriseArchitect,
    /// Solution design and multi-cloud architecture.
    #[serde(rename = "SA")]
    SolutionArchitect,
    /// IaC generation, guardrails and technical implementation.
    #[serde(rename = "TA")]
    TechnicalArchitect,
    /// Approvals, budgets, migrations and KPIs.
    #[serde(rename = "PM")]
    ProjectManager,
    /// Deployment execution, monitoring and incident response.
    #[serde(rename = "SE")]
    SoftwareEngineer,
    /// Read-mostly advisory access.
    #[serde(rename = "Consultant")]
    Consultant,
    /// System administration.
    #[serde(rename = "Admin")]
    Admin,
}

impl Role {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnterpriseArchitect => "EA",
            Self::SolutionArchitect => "SA",
            Self::TechnicalArchitect => "TA",
            Self::ProjectManager => "PM",
            Self::SoftwareEngineer => "SE",
            Self::Consultant => "Consultant",
            Self::Admin => "Admin",
        }
    }

    /// Returns a human-readable role title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::EnterpriseArchitect => "Enterprise Architect",
            Self::SolutionArchitect => "Solution Architect",
            Self::TechnicalArchitect => "Technical Architect",
            Self::ProjectManager => "Project Manager",
            Self::SoftwareEngineer => "Software Engineer",
            Self::Consultant => "Consultant",
            Self::Admin => "Admin",
        }
    }

    /// Returns all built-in roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::EnterpriseArchitect,
            Role::SolutionArchitect,
            Role::TechnicalArchitect,
            Role::ProjectManager,
            Role::SoftwareEngineer,
            Role::Consultant,
            Role::Admin,
        ];

        ALL
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EA" => Ok(Self::EnterpriseArchitect),
            "SA" => Ok(Self::SolutionArchitect),
            "TA" => Ok(Self::TechnicalArchitect),
            "PM" => Ok(Self::ProjectManager),
            "SE" => Ok(Self::SoftwareEngineer),
            "Consultant" => Ok(Self::Consultant),
            "Admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Role;

    #[test]
    fn transport_value_roundtrips_for_every_role() {
        for role in Role::all() {
            let parsed = Role::from_str(role.as_str());
            assert!(matches!(parsed, Ok(value) if value == *role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("NoSuchRole").is_err());
        assert!(Role::from_str("admin").is_err());
    }

    #[test]
    fn serde_uses_short_codes() {
        let encoded = serde_json::to_string(&Role::ProjectManager)
            .unwrap_or_else(|_| panic!("role should serialize"));
        assert_eq!(encoded, "\"PM\"");
    }
}
