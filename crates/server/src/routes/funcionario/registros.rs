//! Employee record listing handlers.
//!
//! Read-only views over the HR record tables, always scoped to the
//! logged-in user.

use axum::{Json, extract::State};

use crate::db::{
    AbsenceRepository, ChargeRepository, DocumentRepository, PunishmentRepository,
    UniformRepository, VacationRepository,
};
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::{Absence, Charge, DocumentRecord, Punishment, UniformHandout, Vacation};
use crate::state::AppState;

/// List the user's vacation records.
pub async fn vacations(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Vacation>>, AppError> {
    let list = VacationRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(list))
}

/// List the user's absence records.
pub async fn absences(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Absence>>, AppError> {
    let list = AbsenceRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(list))
}

/// List the user's punishment records.
pub async fn punishments(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Punishment>>, AppError> {
    let list = PunishmentRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(list))
}

/// List the user's uniform hand-outs.
pub async fn uniforms(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<UniformHandout>>, AppError> {
    let list = UniformRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(list))
}

/// List the user's document records.
pub async fn documents(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<DocumentRecord>>, AppError> {
    let list = DocumentRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(list))
}

/// List the user's financial charges.
pub async fn charges(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Charge>>, AppError> {
    let list = ChargeRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(list))
}
