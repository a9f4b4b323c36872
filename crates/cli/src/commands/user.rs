//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a user with a profile
//! portal-cli user create -e pessoa@example.com -p "senha-segura" -r funcionario
//!
//! # Promote an existing user to administrator
//! portal-cli user promote -e pessoa@example.com
//!
//! # Mark a user's email as confirmed
//! portal-cli user confirm -e pessoa@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use portal_core::Role;

/// Errors that can occur during user management operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: funcionario, admin")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password too short.
    #[error("Password must be at least 8 characters")]
    WeakPassword,

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// User not found.
    #[error("No user found with email: {0}")]
    UserNotFound(String),

    /// Password hashing error.
    #[error("Password hashing error")]
    PasswordHash,
}

/// Create a new user with an email-confirmed account and a profile.
///
/// # Errors
///
/// Returns `UserError` on invalid input, a duplicate email or database
/// failure.
pub async fn create(email: &str, password: &str, role: &str) -> Result<i32, UserError> {
    dotenvy::dotenv().ok();

    let role: Role = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;

    let email = portal_core::Email::parse(email)
        .map_err(|e| UserError::InvalidEmail(e.to_string()))?;

    if password.len() < 8 {
        return Err(UserError::WeakPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| UserError::PasswordHash)?
        .to_string();

    let pool = connect().await?;

    tracing::info!("Creating user: {} ({})", email, role);

    let existing = sqlx::query_scalar::<_, i32>(r#"SELECT id FROM portal."user" WHERE email = $1"#)
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(UserError::UserExists(email.to_string()));
    }

    let user_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO portal."user" (email, password_hash, email_confirmed)
        VALUES ($1, $2, TRUE)
        RETURNING id
        "#,
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .fetch_one(&pool)
    .await?;

    sqlx::query("INSERT INTO portal.profile (user_id, role) VALUES ($1, $2)")
        .bind(user_id)
        .bind(role.as_str())
        .execute(&pool)
        .await?;

    tracing::info!("User created with ID {user_id}");
    Ok(user_id)
}

/// Promote an existing user to the administrator role.
///
/// # Errors
///
/// Returns `UserError::UserNotFound` if no user has this email.
pub async fn promote(email: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let pool = connect().await?;

    let result = sqlx::query(
        r#"
        UPDATE portal.profile
        SET role = 'admin', updated_at = NOW()
        WHERE user_id = (SELECT id FROM portal."user" WHERE email = $1)
        "#,
    )
    .bind(email)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(UserError::UserNotFound(email.to_owned()));
    }

    tracing::info!("User {email} promoted to administrator");
    Ok(())
}

/// Mark a user's email address as confirmed.
///
/// # Errors
///
/// Returns `UserError::UserNotFound` if no user has this email.
pub async fn confirm(email: &str) -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let pool = connect().await?;

    let result = sqlx::query(
        r#"UPDATE portal."user" SET email_confirmed = TRUE, updated_at = NOW() WHERE email = $1"#,
    )
    .bind(email)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(UserError::UserNotFound(email.to_owned()));
    }

    tracing::info!("Email confirmed for {email}");
    Ok(())
}

async fn connect() -> Result<PgPool, UserError> {
    let database_url = std::env::var("PORTAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| UserError::MissingEnvVar("PORTAL_DATABASE_URL"))?;

    tracing::info!("Connecting to portal database...");
    Ok(PgPool::connect(&database_url).await?)
}
