//! Request triage handlers.
//!
//! Administrators list the request queue and approve or refuse pending
//! entries; deciding a request stamps the deciding administrator and the
//! decision time.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use portal_core::{RequestId, RequestStatus};
use serde::Deserialize;

use crate::db::RequestRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Request;
use crate::state::AppState;

/// Listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<RequestStatus>,
}

/// List all requests, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Request>>, AppError> {
    let list = RequestRepository::new(state.pool())
        .list_all(query.status)
        .await?;
    Ok(Json(list))
}

/// Approve a pending request.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Request>, AppError> {
    decide(&state, admin.id, id, RequestStatus::Aprovada).await
}

/// Refuse a pending request.
pub async fn refuse(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Request>, AppError> {
    decide(&state, admin.id, id, RequestStatus::Recusada).await
}

async fn decide(
    state: &AppState,
    admin_id: portal_core::UserId,
    id: i32,
    status: RequestStatus,
) -> Result<Json<Request>, AppError> {
    let request = RequestRepository::new(state.pool())
        .decide(RequestId::new(id), status, admin_id)
        .await?;

    tracing::info!(
        admin_id = %admin_id,
        request_id = id,
        status = %status,
        "request decided"
    );
    Ok(Json(request))
}
