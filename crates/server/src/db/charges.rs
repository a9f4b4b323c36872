//! Financial charge repository.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use portal_core::{ChargeId, UserId};

use super::RepositoryError;
use crate::models::Charge;

#[derive(Debug, sqlx::FromRow)]
struct ChargeRow {
    id: i32,
    user_id: i32,
    description: String,
    amount: Decimal,
    due_date: NaiveDate,
    paid: bool,
    created_at: DateTime<Utc>,
}

impl From<ChargeRow> for Charge {
    fn from(row: ChargeRow) -> Self {
        Self {
            id: ChargeId::new(row.id),
            user_id: UserId::new(row.user_id),
            description: row.description,
            amount: row.amount,
            due_date: row.due_date,
            paid: row.paid,
            created_at: row.created_at,
        }
    }
}

/// Repository for financial charge records.
pub struct ChargeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChargeRepository<'a> {
    /// Create a new charge repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all charges, soonest due date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Charge>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChargeRow>(
            r#"
            SELECT id, user_id, description, amount, due_date, paid, created_at
            FROM portal.charge
            ORDER BY due_date ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List one employee's charges, soonest due date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Charge>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChargeRow>(
            r#"
            SELECT id, user_id, description, amount, due_date, paid, created_at
            FROM portal.charge
            WHERE user_id = $1
            ORDER BY due_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a charge.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        description: &str,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Charge, RepositoryError> {
        let row = sqlx::query_as::<_, ChargeRow>(
            r#"
            INSERT INTO portal.charge (user_id, description, amount, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, description, amount, due_date, paid, created_at
            "#,
        )
        .bind(user_id)
        .bind(description)
        .bind(amount)
        .bind(due_date)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Mark a charge as settled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the charge doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_paid(&self, id: ChargeId) -> Result<Charge, RepositoryError> {
        let row = sqlx::query_as::<_, ChargeRow>(
            r#"
            UPDATE portal.charge
            SET paid = TRUE
            WHERE id = $1
            RETURNING id, user_id, description, amount, due_date, paid, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a charge.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the charge doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ChargeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.charge WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
