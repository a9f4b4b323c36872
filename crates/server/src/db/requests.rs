//! Employee request repository.
//!
//! Request payloads are stored as internally tagged JSONB and deserialized
//! back into [`RequestDetails`], so every consumer matches the variants
//! exhaustively.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portal_core::{RequestId, RequestStatus, UserId};

use super::RepositoryError;
use crate::models::{Request, RequestDetails};

/// Internal row type for `portal.request` queries.
#[derive(Debug, sqlx::FromRow)]
struct RequestRow {
    id: i32,
    user_id: i32,
    status: String,
    payload: serde_json::Value,
    decided_by: Option<i32>,
    decided_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for Request {
    type Error = RepositoryError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        let status: RequestStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;
        let details: RequestDetails = serde_json::from_value(row.payload).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid request payload: {e}"))
        })?;

        Ok(Self {
            id: RequestId::new(row.id),
            user_id: UserId::new(row.user_id),
            details,
            status,
            decided_by: row.decided_by.map(UserId::new),
            decided_at: row.decided_at,
            created_at: row.created_at,
        })
    }
}

/// Repository for employee request operations.
pub struct RequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RequestRepository<'a> {
    /// Create a new request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending request row for a user.
    ///
    /// The `kind` column is derived from the payload variant, so filters
    /// and the JSON tag can never disagree.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the payload cannot be
    /// serialized.
    pub async fn insert(
        &self,
        user_id: UserId,
        details: &RequestDetails,
    ) -> Result<Request, RepositoryError> {
        let payload = serde_json::to_value(details).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize request payload: {e}"))
        })?;

        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            INSERT INTO portal.request (user_id, kind, status, payload)
            VALUES ($1, $2, 'pendente', $3)
            RETURNING id, user_id, status, payload, decided_by, decided_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(details.kind())
        .bind(payload)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List a user's own requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Request>, RepositoryError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT id, user_id, status, payload, decided_by, decided_at, created_at
            FROM portal.request
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List all requests, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_all(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<Request>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, RequestRow>(
                    r#"
                    SELECT id, user_id, status, payload, decided_by, decided_at, created_at
                    FROM portal.request
                    WHERE status = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, RequestRow>(
                    r#"
                    SELECT id, user_id, status, payload, decided_by, decided_at, created_at
                    FROM portal.request
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Record an administrator decision on a pending request.
    ///
    /// Only pending requests can be decided; deciding an already decided
    /// request returns `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no pending request
    /// with this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn decide(
        &self,
        id: RequestId,
        status: RequestStatus,
        decided_by: UserId,
    ) -> Result<Request, RepositoryError> {
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            UPDATE portal.request
            SET status = $1, decided_by = $2, decided_at = NOW()
            WHERE id = $3 AND status = 'pendente'
            RETURNING id, user_id, status, payload, decided_by, decided_at, created_at
            "#,
        )
        .bind(status.as_str())
        .bind(decided_by)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
