//! Administrator record CRUD handlers.
//!
//! One list/create pair and a delete per HR record table, plus the settle
//! action for financial charges.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use portal_core::{
    AbsenceId, ChargeId, DocumentId, PunishmentId, PunishmentKind, UniformHandoutId, UserId,
    VacationId,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::{
    AbsenceRepository, ChargeRepository, DocumentRepository, PunishmentRepository,
    UniformRepository, VacationRepository,
};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{Absence, Charge, DocumentRecord, Punishment, UniformHandout, Vacation};
use crate::state::AppState;

// =============================================================================
// Payloads
// =============================================================================

/// New vacation record.
#[derive(Debug, Deserialize)]
pub struct VacationForm {
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub note: Option<String>,
}

/// New absence record.
#[derive(Debug, Deserialize)]
pub struct AbsenceForm {
    pub user_id: i32,
    pub date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub justified: bool,
}

/// New punishment record.
#[derive(Debug, Deserialize)]
pub struct PunishmentForm {
    pub user_id: i32,
    pub kind: PunishmentKind,
    pub date: NaiveDate,
    pub description: String,
}

/// New uniform hand-out record.
#[derive(Debug, Deserialize)]
pub struct UniformForm {
    pub user_id: i32,
    pub piece: String,
    pub size: String,
    pub quantity: i32,
}

/// New document record.
#[derive(Debug, Deserialize)]
pub struct DocumentForm {
    pub user_id: i32,
    pub title: String,
    pub url: String,
}

/// New financial charge.
#[derive(Debug, Deserialize)]
pub struct ChargeForm {
    pub user_id: i32,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

// =============================================================================
// Vacations
// =============================================================================

/// List all vacation records.
pub async fn list_vacations(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Vacation>>, AppError> {
    Ok(Json(VacationRepository::new(state.pool()).list_all().await?))
}

/// Create a vacation record.
pub async fn create_vacation(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<VacationForm>,
) -> Result<(StatusCode, Json<Vacation>), AppError> {
    if form.end_date < form.start_date {
        return Err(AppError::BadRequest(
            "end date must not precede start date".to_owned(),
        ));
    }

    let vacation = VacationRepository::new(state.pool())
        .insert(
            UserId::new(form.user_id),
            form.start_date,
            form.end_date,
            form.note.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(vacation)))
}

/// Delete a vacation record.
pub async fn delete_vacation(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    VacationRepository::new(state.pool())
        .delete(VacationId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Absences
// =============================================================================

/// List all absence records.
pub async fn list_absences(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Absence>>, AppError> {
    Ok(Json(AbsenceRepository::new(state.pool()).list_all().await?))
}

/// Create an absence record.
pub async fn create_absence(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<AbsenceForm>,
) -> Result<(StatusCode, Json<Absence>), AppError> {
    if form.reason.trim().is_empty() {
        return Err(AppError::BadRequest("reason must not be empty".to_owned()));
    }

    let absence = AbsenceRepository::new(state.pool())
        .insert(
            UserId::new(form.user_id),
            form.date,
            &form.reason,
            form.justified,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(absence)))
}

/// Delete an absence record.
pub async fn delete_absence(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    AbsenceRepository::new(state.pool())
        .delete(AbsenceId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Punishments
// =============================================================================

/// List all punishment records.
pub async fn list_punishments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Punishment>>, AppError> {
    Ok(Json(
        PunishmentRepository::new(state.pool()).list_all().await?,
    ))
}

/// Create a punishment record.
pub async fn create_punishment(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(form): Json<PunishmentForm>,
) -> Result<(StatusCode, Json<Punishment>), AppError> {
    if form.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "description must not be empty".to_owned(),
        ));
    }

    let punishment = PunishmentRepository::new(state.pool())
        .insert(
            UserId::new(form.user_id),
            form.kind,
            form.date,
            &form.description,
        )
        .await?;

    tracing::info!(
        admin_id = %admin.id,
        user_id = form.user_id,
        kind = %form.kind,
        "punishment recorded"
    );
    Ok((StatusCode::CREATED, Json(punishment)))
}

/// Delete a punishment record.
pub async fn delete_punishment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    PunishmentRepository::new(state.pool())
        .delete(PunishmentId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Uniform hand-outs
// =============================================================================

/// List all uniform hand-outs.
pub async fn list_uniforms(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UniformHandout>>, AppError> {
    Ok(Json(UniformRepository::new(state.pool()).list_all().await?))
}

/// Create a uniform hand-out record.
pub async fn create_uniform(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<UniformForm>,
) -> Result<(StatusCode, Json<UniformHandout>), AppError> {
    if form.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_owned(),
        ));
    }

    let handout = UniformRepository::new(state.pool())
        .insert(
            UserId::new(form.user_id),
            &form.piece,
            &form.size,
            form.quantity,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(handout)))
}

/// Delete a uniform hand-out record.
pub async fn delete_uniform(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    UniformRepository::new(state.pool())
        .delete(UniformHandoutId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Documents
// =============================================================================

/// List all document records.
pub async fn list_documents(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<DocumentRecord>>, AppError> {
    Ok(Json(
        DocumentRepository::new(state.pool()).list_all().await?,
    ))
}

/// Create a document record pointing at an externally stored blob.
pub async fn create_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<DocumentForm>,
) -> Result<(StatusCode, Json<DocumentRecord>), AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_owned()));
    }
    if !form.url.starts_with("http://") && !form.url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "url must be an http(s) URL".to_owned(),
        ));
    }

    let document = DocumentRepository::new(state.pool())
        .insert(UserId::new(form.user_id), &form.title, &form.url)
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Delete a document record.
pub async fn delete_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    DocumentRepository::new(state.pool())
        .delete(DocumentId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Financial charges
// =============================================================================

/// List all financial charges.
pub async fn list_charges(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Charge>>, AppError> {
    Ok(Json(ChargeRepository::new(state.pool()).list_all().await?))
}

/// Create a financial charge.
pub async fn create_charge(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<ChargeForm>,
) -> Result<(StatusCode, Json<Charge>), AppError> {
    if form.amount.is_sign_negative() || form.amount.is_zero() {
        return Err(AppError::BadRequest("amount must be positive".to_owned()));
    }

    let charge = ChargeRepository::new(state.pool())
        .insert(
            UserId::new(form.user_id),
            &form.description,
            form.amount,
            form.due_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(charge)))
}

/// Mark a charge as settled.
pub async fn settle_charge(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Charge>, AppError> {
    let charge = ChargeRepository::new(state.pool())
        .mark_paid(ChargeId::new(id))
        .await?;

    tracing::info!(admin_id = %admin.id, charge_id = id, "charge settled");
    Ok(Json(charge))
}

/// Delete a financial charge.
pub async fn delete_charge(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    ChargeRepository::new(state.pool())
        .delete(ChargeId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
