//! Profile/role record domain type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use portal_core::{Email, ProfileId, Role, UserId};

/// The persisted record linking an identity to its role classification and
/// personal/work details.
///
/// Exactly one profile exists per user; it is auto-created with the default
/// role the first time an identity is observed without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Database ID of this profile.
    pub id: ProfileId,
    /// The identity this profile belongs to.
    pub user_id: UserId,
    /// Role classification (admin vs. standard member).
    pub role: Role,
    /// Employee's full name.
    pub full_name: String,
    /// Brazilian taxpayer number (self-service field).
    pub cpf: Option<String>,
    /// Job position/title.
    pub position: Option<String>,
    /// Date of admission.
    pub admission_date: Option<NaiveDate>,
    /// When this profile was created.
    pub created_at: DateTime<Utc>,
    /// When this profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An employee as shown on the management screens: identity plus profile.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    /// The identity this row describes.
    pub user_id: UserId,
    /// Login email.
    pub email: Email,
    /// Role classification.
    pub role: Role,
    /// Employee's full name.
    pub full_name: String,
    /// Brazilian taxpayer number.
    pub cpf: Option<String>,
    /// Job position/title.
    pub position: Option<String>,
    /// Date of admission.
    pub admission_date: Option<NaiveDate>,
}

/// Self-service profile fields a member may edit.
///
/// The role is deliberately absent here; it is only mutated through the
/// admin employee-management surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    /// New full name, if changing.
    pub full_name: Option<String>,
    /// New CPF, if changing.
    pub cpf: Option<String>,
    /// New position, if changing.
    pub position: Option<String>,
}
