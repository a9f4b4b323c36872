//! Document record repository.
//!
//! The portal stores document metadata only; the blob itself lives in
//! external storage and is reached through the stored URL.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portal_core::{DocumentId, UserId};

use super::RepositoryError;
use crate::models::DocumentRecord;

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: i32,
    user_id: i32,
    title: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: DocumentId::new(row.id),
            user_id: UserId::new(row.user_id),
            title: row.title,
            url: row.url,
            created_at: row.created_at,
        }
    }
}

/// Repository for document records.
pub struct DocumentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DocumentRepository<'a> {
    /// Create a new document repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all document records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<DocumentRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, user_id, title, url, created_at
            FROM portal.document
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List one employee's document records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DocumentRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, user_id, title, url, created_at
            FROM portal.document
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a document record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        title: &str,
        url: &str,
    ) -> Result<DocumentRecord, RepositoryError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO portal.document (user_id, title, url)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, url, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(url)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a document record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: DocumentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.document WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
