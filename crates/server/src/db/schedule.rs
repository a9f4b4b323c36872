//! Repositories for time-based HR records: vacations, absences and
//! disciplinary punishments.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use portal_core::{AbsenceId, PunishmentId, PunishmentKind, UserId, VacationId};

use super::RepositoryError;
use crate::models::{Absence, Punishment, Vacation};

#[derive(Debug, sqlx::FromRow)]
struct VacationRow {
    id: i32,
    user_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<VacationRow> for Vacation {
    fn from(row: VacationRow) -> Self {
        Self {
            id: VacationId::new(row.id),
            user_id: UserId::new(row.user_id),
            start_date: row.start_date,
            end_date: row.end_date,
            note: row.note,
            created_at: row.created_at,
        }
    }
}

/// Repository for vacation records.
pub struct VacationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VacationRepository<'a> {
    /// Create a new vacation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all vacation records, most recent period first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Vacation>, RepositoryError> {
        let rows = sqlx::query_as::<_, VacationRow>(
            r#"
            SELECT id, user_id, start_date, end_date, note, created_at
            FROM portal.vacation
            ORDER BY start_date DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List one employee's vacation records, most recent period first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Vacation>, RepositoryError> {
        let rows = sqlx::query_as::<_, VacationRow>(
            r#"
            SELECT id, user_id, start_date, end_date, note, created_at
            FROM portal.vacation
            WHERE user_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a vacation record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        note: Option<&str>,
    ) -> Result<Vacation, RepositoryError> {
        let row = sqlx::query_as::<_, VacationRow>(
            r#"
            INSERT INTO portal.vacation (user_id, start_date, end_date, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, start_date, end_date, note, created_at
            "#,
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .bind(note)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a vacation record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: VacationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.vacation WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AbsenceRow {
    id: i32,
    user_id: i32,
    date: NaiveDate,
    reason: String,
    justified: bool,
    created_at: DateTime<Utc>,
}

impl From<AbsenceRow> for Absence {
    fn from(row: AbsenceRow) -> Self {
        Self {
            id: AbsenceId::new(row.id),
            user_id: UserId::new(row.user_id),
            date: row.date,
            reason: row.reason,
            justified: row.justified,
            created_at: row.created_at,
        }
    }
}

/// Repository for absence records.
pub struct AbsenceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AbsenceRepository<'a> {
    /// Create a new absence repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all absence records, most recent day first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Absence>, RepositoryError> {
        let rows = sqlx::query_as::<_, AbsenceRow>(
            r#"
            SELECT id, user_id, date, reason, justified, created_at
            FROM portal.absence
            ORDER BY date DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List one employee's absence records, most recent day first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Absence>, RepositoryError> {
        let rows = sqlx::query_as::<_, AbsenceRow>(
            r#"
            SELECT id, user_id, date, reason, justified, created_at
            FROM portal.absence
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert an absence record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        date: NaiveDate,
        reason: &str,
        justified: bool,
    ) -> Result<Absence, RepositoryError> {
        let row = sqlx::query_as::<_, AbsenceRow>(
            r#"
            INSERT INTO portal.absence (user_id, date, reason, justified)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, reason, justified, created_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(reason)
        .bind(justified)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete an absence record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AbsenceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.absence WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PunishmentRow {
    id: i32,
    user_id: i32,
    kind: String,
    date: NaiveDate,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PunishmentRow> for Punishment {
    type Error = RepositoryError;

    fn try_from(row: PunishmentRow) -> Result<Self, Self::Error> {
        let kind: PunishmentKind = row.kind.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid punishment kind in database: {e}"))
        })?;

        Ok(Self {
            id: PunishmentId::new(row.id),
            user_id: UserId::new(row.user_id),
            kind,
            date: row.date,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

/// Repository for punishment records.
pub struct PunishmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PunishmentRepository<'a> {
    /// Create a new punishment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all punishment records, most recent day first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Punishment>, RepositoryError> {
        let rows = sqlx::query_as::<_, PunishmentRow>(
            r#"
            SELECT id, user_id, kind, date, description, created_at
            FROM portal.punishment
            ORDER BY date DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List one employee's punishment records, most recent day first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Punishment>, RepositoryError> {
        let rows = sqlx::query_as::<_, PunishmentRow>(
            r#"
            SELECT id, user_id, kind, date, description, created_at
            FROM portal.punishment
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert a punishment record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        kind: PunishmentKind,
        date: NaiveDate,
        description: &str,
    ) -> Result<Punishment, RepositoryError> {
        let row = sqlx::query_as::<_, PunishmentRow>(
            r#"
            INSERT INTO portal.punishment (user_id, kind, date, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, kind, date, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(date)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Delete a punishment record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PunishmentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.punishment WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
