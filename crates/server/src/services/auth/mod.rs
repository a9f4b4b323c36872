//! Authentication and role provisioning service.
//!
//! Wraps the user and profile repositories behind the portal's sign-in,
//! sign-up and profile auto-creation operations.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use portal_core::{Email, Role, UserId};

use crate::db::{ProfileRepository, RepositoryError, UserRepository};
use crate::models::{CurrentUser, Profile};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles registration, login and the profile record that carries the
/// user's role. Every successful sign-in or sign-up resolves the role
/// before returning, so a logged-in session always has one.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    profiles: ProfileRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// `wants_admin` selects the role of the auto-created profile record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        wants_admin: bool,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;

        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let role = if wants_admin {
            Role::Admin
        } else {
            Role::Funcionario
        };
        let role = self.resolve_role(user.id, role).await?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            role,
        })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::EmailNotConfirmed` for unconfirmed accounts.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if !user.email_confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        let role = self.resolve_role(user.id, Role::default()).await?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            role,
        })
    }

    /// Resolve the role to store in the session.
    ///
    /// Profile lookup errors propagate; a profile *creation* failure is
    /// logged and the login continues with the member role, so a broken
    /// profile insert can never grant elevation or lock a user out.
    async fn resolve_role(&self, user_id: UserId, default_role: Role) -> Result<Role, AuthError> {
        if let Some(profile) = self.profiles.get_by_user_id(user_id).await? {
            return Ok(profile.role);
        }

        match self.profiles.create(user_id, default_role).await {
            Ok(profile) => Ok(profile.role),
            Err(RepositoryError::Conflict(_)) => {
                let profile = self
                    .profiles
                    .get_by_user_id(user_id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                Ok(profile.role)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    user_id = %user_id,
                    "profile creation failed, continuing as member"
                );
                Ok(Role::Funcionario)
            }
        }
    }

    /// Load the user's profile record, creating one with `default_role` if
    /// it doesn't exist yet.
    ///
    /// Idempotent: a concurrent creation losing the unique-constraint race
    /// falls back to re-reading the winner's row.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the profile can neither be read
    /// nor created.
    pub async fn ensure_profile(
        &self,
        user_id: UserId,
        default_role: Role,
    ) -> Result<Profile, AuthError> {
        if let Some(profile) = self.profiles.get_by_user_id(user_id).await? {
            return Ok(profile);
        }

        match self.profiles.create(user_id, default_role).await {
            Ok(profile) => Ok(profile),
            Err(RepositoryError::Conflict(_)) => {
                let profile = self
                    .profiles
                    .get_by_user_id(user_id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                Ok(profile)
            }
            Err(other) => Err(AuthError::Repository(other)),
        }
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_rejects_short() {
        assert!(matches!(
            validate_password("curta"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("senha-longa-o-bastante").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("senha-segura-123").unwrap();
        assert!(verify_password("senha-segura-123", &hash).is_ok());
        assert!(matches!(
            verify_password("senha-errada", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("qualquer", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
