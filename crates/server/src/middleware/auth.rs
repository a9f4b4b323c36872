//! Authentication extractors.
//!
//! Each extractor reads the session snapshot and runs the route admission
//! gate from [`crate::gate`], turning its states into HTTP responses:
//! `Loading` (session backend unavailable) becomes 503, `Unauthenticated`
//! a login redirect, `InsufficientRole` a redirect to the member landing
//! path. Requests accepting `application/json` get status codes and JSON
//! notices instead of redirects.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use portal_core::Role;
use serde_json::json;
use tower_sessions::Session;

use crate::gate::{self, Admission, RouteTarget, SessionSnapshot};
use crate::models::{CurrentUser, session_keys};

/// Extractor that requires an authenticated user, any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Olá, {}!", user.email)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Extractor that requires an authenticated administrator.
pub struct RequireAdmin(pub CurrentUser);

/// Extractor handing the raw session snapshot to handlers that run the
/// gate themselves (the root and auth screens, where the admitted case is
/// a page rather than a rejection).
pub struct GateSnapshot(pub SessionSnapshot);

/// Rejection for the gated extractors.
pub enum GateRejection {
    /// The session backend could not be reached; no admission decision is
    /// possible.
    SessionUnavailable,
    /// Redirect produced by the gate (login or landing path).
    Redirect(String),
    /// Status + notice for API requests.
    Api(StatusCode, &'static str),
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::SessionUnavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            Self::Redirect(to) => Redirect::to(&to).into_response(),
            Self::Api(status, notice) => {
                (status, Json(json!({ "error": notice }))).into_response()
            }
        }
    }
}

fn is_api_request(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// Read the session snapshot for the gate.
///
/// A missing layer or failed backend read yields a loading snapshot; an
/// absent key yields a resolved anonymous one.
async fn snapshot(parts: &Parts) -> SessionSnapshot {
    let Some(session) = parts.extensions.get::<Session>() else {
        return SessionSnapshot::loading();
    };

    match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        Ok(user) => SessionSnapshot::resolved(user),
        Err(_) => SessionSnapshot::loading(),
    }
}

fn admit(
    parts: &Parts,
    snapshot: &SessionSnapshot,
    target: &RouteTarget<'_>,
) -> Result<(), GateRejection> {
    match gate::evaluate(snapshot, target) {
        Admission::Admitted => Ok(()),
        Admission::Loading => Err(GateRejection::SessionUnavailable),
        Admission::Unauthenticated { redirect } => {
            if is_api_request(parts) {
                Err(GateRejection::Api(
                    StatusCode::UNAUTHORIZED,
                    gate::RESTRICTED_NOTICE,
                ))
            } else {
                Err(GateRejection::Redirect(redirect))
            }
        }
        Admission::InsufficientRole { redirect } => {
            if is_api_request(parts) {
                Err(GateRejection::Api(StatusCode::FORBIDDEN, gate::DENIED_NOTICE))
            } else {
                Err(GateRejection::Redirect(redirect.to_owned()))
            }
        }
        Admission::RootRedirect { redirect } | Admission::AuthPageRedirect { redirect } => {
            Err(GateRejection::Redirect(redirect.to_owned()))
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let snapshot = snapshot(parts).await;
        let target = RouteTarget::classify(parts.uri.path());
        admit(parts, &snapshot, &target)?;

        // Admitted implies a present identity for a non-auth-page target.
        snapshot
            .user
            .map(Self)
            .ok_or(GateRejection::SessionUnavailable)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let snapshot = snapshot(parts).await;
        let target = RouteTarget::with_required_role(parts.uri.path(), Some(Role::Admin));
        admit(parts, &snapshot, &target)?;

        snapshot
            .user
            .map(Self)
            .ok_or(GateRejection::SessionUnavailable)
    }
}

impl<S> FromRequestParts<S> for GateSnapshot
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(snapshot(parts).await))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::http::Request;

    fn parts(uri: &str, accept: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(accept) = accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_json_accept_header_marks_api_request() {
        assert!(is_api_request(&parts(
            "/admin/solicitacoes",
            Some("application/json")
        )));
        assert!(is_api_request(&parts(
            "/funcionario/ferias",
            Some("text/html, application/json;q=0.9")
        )));
    }

    #[test]
    fn test_page_navigation_is_not_api_request() {
        assert!(!is_api_request(&parts("/admin/solicitacoes", None)));
        assert!(!is_api_request(&parts(
            "/funcionario/ferias",
            Some("text/html")
        )));
    }
}
