//! Profile and accessibility preference handlers.

use axum::{Json, extract::State};
use portal_core::Role;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::ProfileRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::{Profile, ProfileUpdate, session_keys};
use crate::services::AuthService;
use crate::state::AppState;

/// Accepted font-size preference values.
const FONT_SIZES: &[&str] = &["pequena", "media", "grande"];

/// Default font-size preference.
const DEFAULT_FONT_SIZE: &str = "media";

/// Accessibility preferences stored in the session.
#[derive(Debug, Serialize)]
pub struct Preferences {
    pub font_size: String,
}

/// Preference update payload.
#[derive(Debug, Deserialize)]
pub struct PreferencesForm {
    pub font_size: String,
}

/// Show the logged-in user's profile.
///
/// Creates the profile with the default role if it doesn't exist yet, the
/// same auto-creation path the sign-in flow uses.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Profile>, AppError> {
    let auth = AuthService::new(state.pool());
    let profile = auth.ensure_profile(user.id, Role::default()).await?;
    Ok(Json(profile))
}

/// Update the self-service fields of the logged-in user's profile.
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(form): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profiles = ProfileRepository::new(state.pool());
    let profile = profiles.update_self_service(user.id, &form).await?;

    tracing::debug!(user_id = %user.id, "profile updated");
    Ok(Json(profile))
}

/// Read the accessibility preferences.
pub async fn preferences(
    RequireUser(_user): RequireUser,
    session: Session,
) -> Result<Json<Preferences>, AppError> {
    let font_size = session
        .get::<String>(session_keys::FONT_SIZE)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read session: {e}")))?
        .unwrap_or_else(|| DEFAULT_FONT_SIZE.to_owned());

    Ok(Json(Preferences { font_size }))
}

/// Update the accessibility preferences.
pub async fn update_preferences(
    RequireUser(_user): RequireUser,
    session: Session,
    Json(form): Json<PreferencesForm>,
) -> Result<Json<Preferences>, AppError> {
    if !FONT_SIZES.contains(&form.font_size.as_str()) {
        return Err(AppError::BadRequest(format!(
            "font_size must be one of: {}",
            FONT_SIZES.join(", ")
        )));
    }

    session
        .insert(session_keys::FONT_SIZE, form.font_size.clone())
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    Ok(Json(Preferences {
        font_size: form.font_size,
    }))
}
