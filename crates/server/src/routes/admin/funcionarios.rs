//! Employee management handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use portal_core::{Role, UserId};
use serde::Deserialize;

use crate::db::{ProfileRepository, UserRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{Employee, Profile};
use crate::state::AppState;

/// Work field update payload.
#[derive(Debug, Deserialize)]
pub struct WorkFieldsForm {
    pub position: Option<String>,
    pub admission_date: Option<NaiveDate>,
}

/// Role change payload.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: Role,
}

/// List all employees with their profile data.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = ProfileRepository::new(state.pool()).list_employees().await?;
    Ok(Json(employees))
}

/// Show one employee with their profile data.
pub async fn detail(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<i32>,
) -> Result<Json<Employee>, AppError> {
    let employee = ProfileRepository::new(state.pool())
        .get_employee(UserId::new(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("funcionário {user_id}")))?;

    Ok(Json(employee))
}

/// Update an employee's work fields (position, admission date).
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i32>,
    Json(form): Json<WorkFieldsForm>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileRepository::new(state.pool())
        .update_work_fields(
            UserId::new(user_id),
            form.position.as_deref(),
            form.admission_date,
        )
        .await?;

    tracing::info!(admin_id = %admin.id, user_id, "work fields updated");
    Ok(Json(profile))
}

/// Remove an employee.
///
/// Cascades to the profile and every HR record of the user.
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i32>,
) -> Result<axum::http::StatusCode, AppError> {
    if admin.id.as_i32() == user_id {
        return Err(AppError::BadRequest(
            "administrators cannot remove themselves".to_owned(),
        ));
    }

    UserRepository::new(state.pool())
        .delete(UserId::new(user_id))
        .await?;

    tracing::warn!(admin_id = %admin.id, user_id, "employee removed");
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Change an employee's role classification.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i32>,
    Json(form): Json<RoleForm>,
) -> Result<Json<Profile>, AppError> {
    if admin.id.as_i32() == user_id && form.role != Role::Admin {
        return Err(AppError::BadRequest(
            "administrators cannot demote themselves".to_owned(),
        ));
    }

    let profile = ProfileRepository::new(state.pool())
        .update_role(UserId::new(user_id), form.role)
        .await?;

    tracing::info!(admin_id = %admin.id, user_id, role = %form.role, "role changed");
    Ok(Json(profile))
}
