//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! ovenline-cli admin create -e admin@example.com -n "Admin Name" -p "password"
//!
//! # Promote an existing user
//! ovenline-cli admin promote -e user@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `OVENLINE_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)

use ovenline_core::Email;
use ovenline_server::db::{RepositoryError, UserRepository};
use ovenline_server::services::auth::hash_password;

use super::{CommandError, connect};

/// Create a new admin user.
///
/// # Returns
///
/// The ID of the created admin user.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<i64, CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;

    let pool = connect().await?;
    let users = UserRepository::new(&pool);

    tracing::info!("Creating admin user: {}", email);

    let password_hash = hash_password(password).map_err(|_| CommandError::PasswordHash)?;

    let user = users
        .create_with_password(name, &email, &password_hash, true)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CommandError::UserExists(email.to_string()),
            other => CommandError::Repository(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(user.id.as_i64())
}

/// Promote an existing user to admin.
pub async fn promote_user(email: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;

    let pool = connect().await?;
    let users = UserRepository::new(&pool);

    let user = users
        .get_by_email(&email)
        .await
        .map_err(CommandError::from)?
        .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;

    if user.is_admin {
        tracing::info!("User {} is already an admin", email);
        return Ok(());
    }

    users
        .set_admin(user.id, true)
        .await
        .map_err(CommandError::from)?;

    tracing::info!("User {} is now an admin", email);
    Ok(())
}
