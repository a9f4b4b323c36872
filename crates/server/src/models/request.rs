//! Employee request types.
//!
//! Requests are tagged variant records - one variant per request type - so
//! persistence and export can match exhaustively instead of inspecting
//! loosely typed payloads.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portal_core::{RequestId, RequestStatus, UserId};

/// One uniform piece within a uniform request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniformRequestItem {
    /// Which piece (shirt, pants, boots...).
    pub piece: String,
    /// Requested size.
    pub size: String,
    /// How many of this piece.
    pub quantity: u32,
}

/// The typed payload of a persisted request row.
///
/// A uniform request with several items is persisted as one row per item;
/// the `Uniforme` variant therefore carries a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestDetails {
    /// A single uniform piece.
    Uniforme {
        /// The requested piece.
        item: UniformRequestItem,
    },
    /// A vacation period request.
    Ferias {
        /// First day of the requested period.
        start_date: NaiveDate,
        /// Last day of the requested period.
        end_date: NaiveDate,
    },
    /// A document issuance request.
    Documento {
        /// Which document is being requested.
        title: String,
    },
    /// A salary advance request.
    Adiantamento {
        /// Requested amount.
        amount: Decimal,
    },
}

impl RequestDetails {
    /// The `kind` column value for this variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Uniforme { .. } => "uniforme",
            Self::Ferias { .. } => "ferias",
            Self::Documento { .. } => "documento",
            Self::Adiantamento { .. } => "adiantamento",
        }
    }

    /// One-line human description used in listings and CSV exports.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Uniforme { item } => {
                format!("{}x {} (tam. {})", item.quantity, item.piece, item.size)
            }
            Self::Ferias {
                start_date,
                end_date,
            } => format!("{start_date} a {end_date}"),
            Self::Documento { title } => title.clone(),
            Self::Adiantamento { amount } => format!("R$ {amount}"),
        }
    }
}

/// A persisted employee request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Database ID.
    pub id: RequestId,
    /// The requesting employee.
    pub user_id: UserId,
    /// Typed request payload.
    pub details: RequestDetails,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Administrator that decided this request, if decided.
    pub decided_by: Option<UserId>,
    /// When the decision was made, if decided.
    pub decided_at: Option<DateTime<Utc>>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// A request as submitted by an employee.
///
/// The `Uniforme` variant carries the full item list; the submit handler
/// fans it out into one persisted row per item.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NewRequest {
    /// A uniform request with one or more items.
    Uniforme {
        /// Requested pieces.
        items: Vec<UniformRequestItem>,
    },
    /// A vacation period request.
    Ferias {
        /// First day of the requested period.
        start_date: NaiveDate,
        /// Last day of the requested period.
        end_date: NaiveDate,
    },
    /// A document issuance request.
    Documento {
        /// Which document is being requested.
        title: String,
    },
    /// A salary advance request.
    Adiantamento {
        /// Requested amount.
        amount: Decimal,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_details_kind_tags() {
        let details = RequestDetails::Documento {
            title: "Declaração de vínculo".to_owned(),
        };
        assert_eq!(details.kind(), "documento");

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json.get("kind").unwrap(), "documento");
    }

    #[test]
    fn test_details_serde_roundtrip() {
        let details = RequestDetails::Uniforme {
            item: UniformRequestItem {
                piece: "camisa".to_owned(),
                size: "M".to_owned(),
                quantity: 2,
            },
        };
        let json = serde_json::to_string(&details).unwrap();
        let back: RequestDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn test_uniform_summary() {
        let details = RequestDetails::Uniforme {
            item: UniformRequestItem {
                piece: "calça".to_owned(),
                size: "42".to_owned(),
                quantity: 1,
            },
        };
        assert_eq!(details.summary(), "1x calça (tam. 42)");
    }

    #[test]
    fn test_new_request_deserializes_tagged() {
        let json = r#"{"kind":"ferias","start_date":"2026-09-01","end_date":"2026-09-15"}"#;
        let req: NewRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req, NewRequest::Ferias { .. }));
    }
}
