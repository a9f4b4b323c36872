//! Employee area route handlers.
//!
//! Everything here requires an authenticated user of any role; see the
//! route admission rules in [`crate::gate`].

pub mod perfil;
pub mod registros;
pub mod solicitacoes;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the employee area router (nested under `/funcionario`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/perfil", get(perfil::show).put(perfil::update))
        .route(
            "/preferencias",
            get(perfil::preferences).put(perfil::update_preferences),
        )
        .route(
            "/solicitacoes",
            get(solicitacoes::list).post(solicitacoes::submit),
        )
        .route("/ferias", get(registros::vacations))
        .route("/faltas", get(registros::absences))
        .route("/punicoes", get(registros::punishments))
        .route("/uniformes", get(registros::uniforms))
        .route("/documentos", get(registros::documents))
        .route("/cobrancas", get(registros::charges))
}
