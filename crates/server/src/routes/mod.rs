//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Role-based landing redirect
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Auth
//! GET  /login                   - Login screen (redirects if authenticated)
//! POST /login                   - Login action
//! GET  /register                - Registration screen
//! POST /register                - Registration action
//! POST /logout                  - Logout action
//!
//! # Employee area (authenticated)
//! GET  /funcionario/perfil        - Own profile
//! PUT  /funcionario/perfil        - Update own profile fields
//! GET  /funcionario/preferencias  - Accessibility preferences
//! PUT  /funcionario/preferencias  - Update accessibility preferences
//! GET  /funcionario/solicitacoes  - Own requests
//! POST /funcionario/solicitacoes  - Submit a request
//! GET  /funcionario/ferias        - Own vacation records
//! GET  /funcionario/faltas        - Own absence records
//! GET  /funcionario/punicoes      - Own punishment records
//! GET  /funcionario/uniformes     - Own uniform hand-outs
//! GET  /funcionario/documentos    - Own document records
//! GET  /funcionario/cobrancas     - Own financial charges
//!
//! # Admin area (administrator role)
//! GET  /admin/gestao-funcionarios                - Employee listing
//! GET  /admin/gestao-funcionarios/{id}           - Employee detail
//! PUT  /admin/gestao-funcionarios/{id}           - Update work fields
//! DELETE /admin/gestao-funcionarios/{id}         - Remove an employee
//! PUT  /admin/gestao-funcionarios/{id}/role      - Change role
//! GET  /admin/solicitacoes                       - All requests (optional ?status=)
//! POST /admin/solicitacoes/{id}/aprovar          - Approve a request
//! POST /admin/solicitacoes/{id}/recusar          - Refuse a request
//! GET|POST /admin/{ferias,faltas,punicoes,uniformes,documentos,cobrancas}
//! DELETE   /admin/{...}/{id}                     - Delete a record
//! POST /admin/cobrancas/{id}/pagar               - Settle a charge
//! GET  /admin/relatorios/{report}                - CSV download
//! ```

pub mod admin;
pub mod auth;
pub mod funcionario;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::gate::{self, Admission, LOGIN_PATH, RouteTarget};
use crate::middleware::GateSnapshot;
use crate::state::AppState;

/// Create the portal router (auth + employee + admin areas).
pub fn routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(root))
        .merge(auth::routes())
        .nest("/funcionario", funcionario::routes())
        .nest("/admin", admin::routes())
        .fallback(not_found)
}

/// Role-based landing redirect for the application root, decided by the
/// admission gate.
async fn root(GateSnapshot(snapshot): GateSnapshot) -> Response {
    match gate::evaluate(&snapshot, &RouteTarget::classify("/")) {
        Admission::Loading => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Admission::Unauthenticated { redirect } => Redirect::to(&redirect).into_response(),
        Admission::RootRedirect { redirect }
        | Admission::AuthPageRedirect { redirect }
        | Admission::InsufficientRole { redirect } => Redirect::to(redirect).into_response(),
        // The gate never admits the root; it always redirects.
        Admission::Admitted => Redirect::to(LOGIN_PATH).into_response(),
    }
}

/// Catch-all 404 handler.
async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Página não encontrada." })),
    )
        .into_response()
}
