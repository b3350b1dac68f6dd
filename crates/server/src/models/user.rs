//! User domain types.

use chrono::{DateTime, Utc};

use ovenline_core::{Email, UserId};

/// A site user (domain type).
///
/// Credential material never leaves the `users` repository; this core only
/// reads `id` and `is_admin` for authorization decisions.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address (unique).
    pub email: Email,
    /// Whether the user may access staff endpoints.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
