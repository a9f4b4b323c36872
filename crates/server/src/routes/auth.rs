//! Authentication route handlers.
//!
//! Login, registration and logout. Successful sign-in/sign-up runs the
//! profile auto-creation path and stores a [`CurrentUser`] snapshot in the
//! session; the response carries the role-appropriate landing path so the
//! client can navigate there.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::gate::{self, Admission, LOGIN_PATH, REGISTER_PATH, RouteTarget, SessionSnapshot};
use crate::middleware::GateSnapshot;
use crate::models::{CurrentUser, session_keys};
use crate::services::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    /// Requests the administrator role for the auto-created profile.
    #[serde(default)]
    pub wants_admin: bool,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUser,
    /// Landing path for the user's role.
    pub redirect: &'static str,
}

/// Create the auth routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_screen).post(login))
        .route("/register", get(register_screen).post(register))
        .route("/logout", post(logout))
}

/// Login screen. The gate sends authenticated visitors to their landing
/// path; anonymous visitors get the screen itself.
async fn login_screen(GateSnapshot(snapshot): GateSnapshot) -> Response {
    auth_screen(&snapshot, LOGIN_PATH, "login")
}

/// Registration screen, gated the same way as the login screen.
async fn register_screen(GateSnapshot(snapshot): GateSnapshot) -> Response {
    auth_screen(&snapshot, REGISTER_PATH, "register")
}

fn auth_screen(snapshot: &SessionSnapshot, path: &str, screen: &str) -> Response {
    match gate::evaluate(snapshot, &RouteTarget::classify(path)) {
        Admission::AuthPageRedirect { redirect } => Redirect::to(redirect).into_response(),
        Admission::Loading => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        // Unauthenticated on an auth page means: show the page.
        _ => Json(json!({ "screen": screen })).into_response(),
    }
}

/// Login action.
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>, AppError> {
    let auth = AuthService::new(state.pool());
    let user = auth.sign_in(&form.email, &form.password).await?;

    session
        .insert(session_keys::CURRENT_USER, user.clone())
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "user signed in");

    Ok(Json(AuthResponse {
        redirect: user.role.landing_path(),
        user,
    }))
}

/// Registration action.
async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<Json<AuthResponse>, AppError> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .sign_up(&form.email, &form.password, form.wants_admin)
        .await?;

    session
        .insert(session_keys::CURRENT_USER, user.clone())
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    Ok(Json(AuthResponse {
        redirect: user.role.landing_path(),
        user,
    }))
}

/// Logout action. Clears the session and sends the user to the login screen.
async fn logout(session: Session) -> Result<Redirect, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    clear_sentry_user();

    Ok(Redirect::to("/login"))
}
