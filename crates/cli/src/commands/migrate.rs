//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ovenline-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `OVENLINE_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/server/migrations/` and are embedded in
//! the server crate at compile time.

use ovenline_server::db::MIGRATOR;

use super::{CommandError, connect};

/// Run server database migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
