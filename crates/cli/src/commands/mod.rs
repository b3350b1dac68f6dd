//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

use ovenline_server::db;

/// Errors shared across CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository-level error from the server crate.
    #[error("Repository error: {0}")]
    Repository(#[from] db::RepositoryError),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// No user with the given email.
    #[error("No user found with email: {0}")]
    UserNotFound(String),

    /// Password hashing failed.
    #[error("Failed to hash password")]
    PasswordHash,
}

/// Connect to the server database using the same environment variables the
/// server reads.
pub async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("OVENLINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("OVENLINE_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
