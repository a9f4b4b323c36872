//! Profile/role repository.
//!
//! The profile table is the authority on role classification; `ensure` in
//! the auth service builds on `get_by_user_id` + `create_default` here.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use portal_core::{Email, ProfileId, Role, UserId};

use super::RepositoryError;
use crate::models::{Employee, Profile, ProfileUpdate};

/// Internal row type for `portal.profile` queries.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: i32,
    user_id: i32,
    role: String,
    full_name: String,
    cpf: Option<String>,
    position: Option<String>,
    admission_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: ProfileId::new(row.id),
            user_id: UserId::new(row.user_id),
            role,
            full_name: row.full_name,
            cpf: row.cpf,
            position: row.position,
            admission_date: row.admission_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for the employee listing join.
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    user_id: i32,
    email: String,
    role: String,
    full_name: String,
    cpf: Option<String>,
    position: Option<String>,
    admission_date: Option<NaiveDate>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: Role = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            user_id: UserId::new(row.user_id),
            email,
            role,
            full_name: row.full_name,
            cpf: row.cpf,
            position: row.position,
            admission_date: row.admission_date,
        })
    }
}

/// Repository for profile/role database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the profile for a user, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, user_id, role, full_name, cpf, position, admission_date,
                   created_at, updated_at
            FROM portal.profile
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a profile for a user with the given role and empty personal
    /// fields. Used by the profile auto-creation path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a profile already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, role: Role) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO portal.profile (user_id, role)
            VALUES ($1, $2)
            RETURNING id, user_id, role, full_name, cpf, position, admission_date,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| super::conflict_on_unique(e, "profile"))?;

        row.try_into()
    }

    /// Update a profile's role classification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_role(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE portal.profile
            SET role = $1, updated_at = NOW()
            WHERE user_id = $2
            RETURNING id, user_id, role, full_name, cpf, position, admission_date,
                      created_at, updated_at
            "#,
        )
        .bind(role.as_str())
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Update the self-service fields of a profile. `None` fields keep
    /// their current value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_self_service(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE portal.profile
            SET full_name = COALESCE($1, full_name),
                cpf = COALESCE($2, cpf),
                position = COALESCE($3, position),
                updated_at = NOW()
            WHERE user_id = $4
            RETURNING id, user_id, role, full_name, cpf, position, admission_date,
                      created_at, updated_at
            "#,
        )
        .bind(update.full_name.as_deref())
        .bind(update.cpf.as_deref())
        .bind(update.position.as_deref())
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Update the work fields of a profile (admin surface).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_work_fields(
        &self,
        user_id: UserId,
        position: Option<&str>,
        admission_date: Option<NaiveDate>,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE portal.profile
            SET position = COALESCE($1, position),
                admission_date = COALESCE($2, admission_date),
                updated_at = NOW()
            WHERE user_id = $3
            RETURNING id, user_id, role, full_name, cpf, position, admission_date,
                      created_at, updated_at
            "#,
        )
        .bind(position)
        .bind(admission_date)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Get one employee (identity + profile join), if the user exists and
    /// has a profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_employee(
        &self,
        user_id: UserId,
    ) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT p.user_id, u.email, p.role, p.full_name, p.cpf, p.position,
                   p.admission_date
            FROM portal.profile p
            JOIN portal."user" u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all employees (identity + profile join), newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT p.user_id, u.email, p.role, p.full_name, p.cpf, p.position,
                   p.admission_date
            FROM portal.profile p
            JOIN portal."user" u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
