//! Status and kind enums for portal entities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an employee request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, waiting for an administrator decision.
    #[default]
    Pendente,
    /// Approved by an administrator.
    Aprovada,
    /// Refused by an administrator.
    Recusada,
}

impl RequestStatus {
    /// Database/wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Aprovada => "aprovada",
            Self::Recusada => "recusada",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(Self::Pendente),
            "aprovada" => Ok(Self::Aprovada),
            "recusada" => Ok(Self::Recusada),
            other => Err(UnknownVariant {
                what: "request status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Kind of disciplinary punishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunishmentKind {
    /// Written warning.
    Advertencia,
    /// Suspension from work.
    Suspensao,
}

impl PunishmentKind {
    /// Database/wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Advertencia => "advertencia",
            Self::Suspensao => "suspensao",
        }
    }
}

impl fmt::Display for PunishmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PunishmentKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advertencia" => Ok(Self::Advertencia),
            "suspensao" => Ok(Self::Suspensao),
            other => Err(UnknownVariant {
                what: "punishment kind",
                value: other.to_owned(),
            }),
        }
    }
}

/// Error for unknown enum text read from the database or a client.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown {what}: {value}")]
pub struct UnknownVariant {
    /// Which enum was being parsed.
    pub what: &'static str,
    /// The offending value.
    pub value: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_default() {
        assert_eq!(RequestStatus::default(), RequestStatus::Pendente);
    }

    #[test]
    fn test_request_status_roundtrip() {
        for status in [
            RequestStatus::Pendente,
            RequestStatus::Aprovada,
            RequestStatus::Recusada,
        ] {
            let parsed: RequestStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_punishment_kind_roundtrip() {
        for kind in [PunishmentKind::Advertencia, PunishmentKind::Suspensao] {
            let parsed: PunishmentKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = "cancelada".parse::<RequestStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown request status: cancelada");
    }
}
