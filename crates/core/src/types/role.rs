//! Portal role for authorization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown role string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role: {0} (valid roles: admin, funcionario)")]
pub struct RoleParseError(pub String);

/// Role classification attached to a profile record.
///
/// Stored in the database as lowercase text. `Funcionario` is the default
/// assigned when a profile is auto-created for a new identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to the management screens under `/admin`.
    Admin,
    /// Standard member, limited to the `/funcionario` screens.
    #[default]
    Funcionario,
}

impl Role {
    /// Returns the database/wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Funcionario => "funcionario",
        }
    }

    /// Whether this role grants access to the admin area.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Default landing path for a user with this role after login or a
    /// root/auth-page redirect.
    #[must_use]
    pub const fn landing_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/solicitacoes",
            Self::Funcionario => "/funcionario/solicitacoes",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "funcionario" => Ok(Self::Funcionario),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_is_funcionario() {
        assert_eq!(Role::default(), Role::Funcionario);
    }

    #[test]
    fn test_parse_roundtrip() {
        for role in [Role::Admin, Role::Funcionario] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("gerente".parse::<Role>().is_err());
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/admin/solicitacoes");
        assert_eq!(Role::Funcionario.landing_path(), "/funcionario/solicitacoes");
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"funcionario\"").unwrap(),
            Role::Funcionario
        );
    }
}
