//! Uniform hand-out repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portal_core::{UniformHandoutId, UserId};

use super::RepositoryError;
use crate::models::UniformHandout;

#[derive(Debug, sqlx::FromRow)]
struct UniformHandoutRow {
    id: i32,
    user_id: i32,
    piece: String,
    size: String,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl From<UniformHandoutRow> for UniformHandout {
    fn from(row: UniformHandoutRow) -> Self {
        Self {
            id: UniformHandoutId::new(row.id),
            user_id: UserId::new(row.user_id),
            piece: row.piece,
            size: row.size,
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}

/// Repository for uniform hand-out records.
pub struct UniformRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UniformRepository<'a> {
    /// Create a new uniform repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all hand-out records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<UniformHandout>, RepositoryError> {
        let rows = sqlx::query_as::<_, UniformHandoutRow>(
            r#"
            SELECT id, user_id, piece, size, quantity, created_at
            FROM portal.uniform_handout
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List one employee's hand-out records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UniformHandout>, RepositoryError> {
        let rows = sqlx::query_as::<_, UniformHandoutRow>(
            r#"
            SELECT id, user_id, piece, size, quantity, created_at
            FROM portal.uniform_handout
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a hand-out record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        piece: &str,
        size: &str,
        quantity: i32,
    ) -> Result<UniformHandout, RepositoryError> {
        let row = sqlx::query_as::<_, UniformHandoutRow>(
            r#"
            INSERT INTO portal.uniform_handout (user_id, piece, size, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, piece, size, quantity, created_at
            "#,
        )
        .bind(user_id)
        .bind(piece)
        .bind(size)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a hand-out record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UniformHandoutId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.uniform_handout WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
