//! Database operations for the portal `PostgreSQL` schema.
//!
//! # Schema: `portal`
//!
//! ## Tables
//!
//! - `user` - Authentication identities (email + argon2 hash)
//! - `profile` - One-to-one role/personal record per user
//! - `session` - Session storage (tower-sessions)
//! - `request` - Employee requests (tagged variant payloads)
//! - `vacation`, `absence`, `punishment`, `uniform_handout`, `document`,
//!   `charge` - HR record tables
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p portal-cli -- migrate
//! ```

pub mod charges;
pub mod documents;
pub mod profiles;
pub mod requests;
pub mod schedule;
pub mod uniforms;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use charges::ChargeRepository;
pub use documents::DocumentRepository;
pub use profiles::ProfileRepository;
pub use requests::RequestRepository;
pub use schedule::{AbsenceRepository, PunishmentRepository, VacationRepository};
pub use uniforms::UniformRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-violation database error to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
