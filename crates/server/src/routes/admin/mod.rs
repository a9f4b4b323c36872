//! Administrator area route handlers.
//!
//! Everything here requires the administrator role; see the route
//! admission rules in [`crate::gate`].

pub mod funcionarios;
pub mod registros;
pub mod relatorios;
pub mod solicitacoes;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the admin area router (nested under `/admin`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gestao-funcionarios", get(funcionarios::list))
        .route(
            "/gestao-funcionarios/{user_id}",
            get(funcionarios::detail)
                .put(funcionarios::update)
                .delete(funcionarios::remove),
        )
        .route(
            "/gestao-funcionarios/{user_id}/role",
            put(funcionarios::update_role),
        )
        .route("/solicitacoes", get(solicitacoes::list))
        .route("/solicitacoes/{id}/aprovar", post(solicitacoes::approve))
        .route("/solicitacoes/{id}/recusar", post(solicitacoes::refuse))
        .route("/ferias", get(registros::list_vacations).post(registros::create_vacation))
        .route("/ferias/{id}", delete(registros::delete_vacation))
        .route("/faltas", get(registros::list_absences).post(registros::create_absence))
        .route("/faltas/{id}", delete(registros::delete_absence))
        .route(
            "/punicoes",
            get(registros::list_punishments).post(registros::create_punishment),
        )
        .route("/punicoes/{id}", delete(registros::delete_punishment))
        .route(
            "/uniformes",
            get(registros::list_uniforms).post(registros::create_uniform),
        )
        .route("/uniformes/{id}", delete(registros::delete_uniform))
        .route(
            "/documentos",
            get(registros::list_documents).post(registros::create_document),
        )
        .route("/documentos/{id}", delete(registros::delete_document))
        .route(
            "/cobrancas",
            get(registros::list_charges).post(registros::create_charge),
        )
        .route("/cobrancas/{id}", delete(registros::delete_charge))
        .route("/cobrancas/{id}/pagar", post(registros::settle_charge))
        .route("/relatorios/{report}", get(relatorios::download))
}
