//! HR record domain types: vacations, absences, punishments, uniform
//! hand-outs, documents and financial charges.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portal_core::{
    AbsenceId, ChargeId, DocumentId, PunishmentId, PunishmentKind, UniformHandoutId, UserId,
    VacationId,
};

/// A scheduled vacation period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacation {
    /// Database ID.
    pub id: VacationId,
    /// The employee on vacation.
    pub user_id: UserId,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Free-form note.
    pub note: Option<String>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// A registered absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    /// Database ID.
    pub id: AbsenceId,
    /// The absent employee.
    pub user_id: UserId,
    /// Day of the absence.
    pub date: NaiveDate,
    /// Stated reason.
    pub reason: String,
    /// Whether the absence was justified.
    pub justified: bool,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// A disciplinary punishment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Punishment {
    /// Database ID.
    pub id: PunishmentId,
    /// The punished employee.
    pub user_id: UserId,
    /// Warning or suspension.
    pub kind: PunishmentKind,
    /// Day the punishment applies to.
    pub date: NaiveDate,
    /// Description of the occurrence.
    pub description: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// A uniform piece handed out to an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformHandout {
    /// Database ID.
    pub id: UniformHandoutId,
    /// Receiving employee.
    pub user_id: UserId,
    /// Which piece.
    pub piece: String,
    /// Size handed out.
    pub size: String,
    /// Quantity handed out.
    pub quantity: i32,
    /// When the hand-out happened.
    pub created_at: DateTime<Utc>,
}

/// A document record pointing at an externally stored blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Database ID.
    pub id: DocumentId,
    /// The employee the document belongs to.
    pub user_id: UserId,
    /// Document title.
    pub title: String,
    /// Public URL of the stored blob.
    pub url: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// A financial charge against an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    /// Database ID.
    pub id: ChargeId,
    /// The charged employee.
    pub user_id: UserId,
    /// What the charge is for.
    pub description: String,
    /// Charged amount.
    pub amount: Decimal,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Whether the charge has been settled.
    pub paid: bool,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}
