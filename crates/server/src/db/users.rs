//! User repository for database operations.
//!
//! Password hashes never leave this module except through
//! `get_password_hash`, which the auth service uses for verification.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use ovenline_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_admin, created_at
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_admin, created_at
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, RepositoryError> {
        let created_at = Utc::now();
        let row = sqlx::query(
            r"
            INSERT INTO users (name, email, password_hash, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, email, is_admin, created_at
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(is_admin)
        .bind(created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        user_from_row(&row)
    }

    /// Get a user's password hash by email.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, is_admin, created_at, password_hash
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let password_hash: String = r.try_get("password_hash").map_err(RepositoryError::from)?;
        let user = user_from_row(&r)?;

        Ok(Some((user, password_hash)))
    }

    /// Promote an existing user to admin.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET is_admin = ?1 WHERE id = ?2")
            .bind(is_admin)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Map a user row to the domain type, validating the stored email.
fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let email: String = row.try_get("email").map_err(RepositoryError::from)?;
    let email = Email::parse(&email)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))?;

    Ok(User {
        id: row.try_get::<UserId, _>("id").map_err(RepositoryError::from)?,
        name: row.try_get("name").map_err(RepositoryError::from)?,
        email,
        is_admin: row.try_get("is_admin").map_err(RepositoryError::from)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(RepositoryError::from)?,
    })
}
