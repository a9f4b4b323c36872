//! Employee request handlers.

use axum::{Json, extract::State, http::StatusCode};
use futures::future;
use serde::Serialize;

use crate::db::RequestRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::{NewRequest, Request, RequestDetails};
use crate::state::AppState;

/// Response for a submitted request.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub requests: Vec<Request>,
}

/// List the logged-in user's requests, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Request>>, AppError> {
    let requests = RequestRepository::new(state.pool());
    let list = requests.list_for_user(user.id).await?;
    Ok(Json(list))
}

/// Submit a new request.
///
/// A uniform request carrying several items is fanned out into one row per
/// item; the inserts run concurrently and are awaited together. The first
/// failure aborts the success path, but rows already written stay written
/// (at-least-once, non-transactional).
pub async fn submit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(form): Json<NewRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let repo = RequestRepository::new(state.pool());

    let created = match form {
        NewRequest::Uniforme { items } => {
            if items.is_empty() {
                return Err(AppError::BadRequest(
                    "uniform request needs at least one item".to_owned(),
                ));
            }
            if items.iter().any(|item| item.quantity == 0) {
                return Err(AppError::BadRequest(
                    "item quantity must be at least 1".to_owned(),
                ));
            }

            let inserts = items.into_iter().map(|item| {
                let repo = &repo;
                async move {
                    repo.insert(user.id, &RequestDetails::Uniforme { item })
                        .await
                }
            });

            let results = future::join_all(inserts).await;
            results
                .into_iter()
                .collect::<Result<Vec<_>, _>>()
                .map_err(AppError::Database)?
        }
        NewRequest::Ferias {
            start_date,
            end_date,
        } => {
            if end_date < start_date {
                return Err(AppError::BadRequest(
                    "end date must not precede start date".to_owned(),
                ));
            }
            vec![
                repo.insert(user.id, &RequestDetails::Ferias {
                    start_date,
                    end_date,
                })
                .await?,
            ]
        }
        NewRequest::Documento { title } => {
            if title.trim().is_empty() {
                return Err(AppError::BadRequest("title must not be empty".to_owned()));
            }
            vec![repo.insert(user.id, &RequestDetails::Documento { title }).await?]
        }
        NewRequest::Adiantamento { amount } => {
            if amount.is_sign_negative() || amount.is_zero() {
                return Err(AppError::BadRequest(
                    "amount must be positive".to_owned(),
                ));
            }
            vec![
                repo.insert(user.id, &RequestDetails::Adiantamento { amount })
                    .await?,
            ]
        }
    };

    tracing::info!(
        user_id = %user.id,
        count = created.len(),
        kind = created.first().map_or("?", |r| r.details.kind()),
        "request submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Solicitação enviada com sucesso.",
            requests: created,
        }),
    ))
}
