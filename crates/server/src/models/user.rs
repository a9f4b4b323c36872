//! User and session-stored identity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portal_core::{Email, Role, UserId};

/// An authentication identity (domain type).
///
/// Carries no role; the role lives on the one-to-one [`Profile`] record.
///
/// [`Profile`]: crate::models::Profile
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// The user's email address.
    pub email: Email,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Session-stored user snapshot.
///
/// Minimal data kept in the session to identify the logged-in user and
/// their role. Only written after `ensure_profile` completes, so a stored
/// snapshot always carries a resolved role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Role resolved from the profile record.
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user holds the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Session keys for authentication and preference data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the accessibility font-size preference.
    pub const FONT_SIZE: &str = "font_size";
}
