//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] portal_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Login attempt with an unconfirmed email address.
    #[error("email not confirmed")]
    EmailNotConfirmed,

    /// Registration attempt with an already registered email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// The user-facing notification message for this error.
    ///
    /// Closed set of messages; anything not individually mapped falls back
    /// to the generic one so internals never leak into the UI.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E-mail ou senha inválidos.",
            Self::EmailNotConfirmed => "Confirme seu e-mail antes de entrar.",
            Self::UserAlreadyExists => "Este e-mail já está cadastrado.",
            Self::InvalidEmail(_) | Self::WeakPassword(_) => "Dados inválidos. Verifique os campos e tente novamente.",
            Self::Repository(_) | Self::PasswordHash => "Algo deu errado. Tente novamente.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_a_closed_set() {
        let errors = [
            AuthError::InvalidCredentials,
            AuthError::EmailNotConfirmed,
            AuthError::UserAlreadyExists,
            AuthError::WeakPassword("short".to_owned()),
            AuthError::Repository(RepositoryError::NotFound),
            AuthError::PasswordHash,
        ];
        let known = [
            "E-mail ou senha inválidos.",
            "Confirme seu e-mail antes de entrar.",
            "Este e-mail já está cadastrado.",
            "Dados inválidos. Verifique os campos e tente novamente.",
            "Algo deu errado. Tente novamente.",
        ];
        for error in errors {
            assert!(known.contains(&error.user_message()), "{error}");
        }
    }

    #[test]
    fn test_internal_errors_fall_back_to_generic_message() {
        let error = AuthError::Repository(RepositoryError::DataCorruption(
            "secret detail".to_owned(),
        ));
        assert_eq!(error.user_message(), "Algo deu errado. Tente novamente.");
    }
}
