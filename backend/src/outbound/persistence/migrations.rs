//! Embedded schema migrations applied at startup.
//!
//! Diesel's migration harness is synchronous, so migrations run on a blocking
//! thread with a dedicated `PgConnection` rather than a pooled async one.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while bringing the schema up to date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

/// Apply every pending migration, returning the versions that ran.
pub fn run_pending_migrations_blocking(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|error| MigrationError::Connect {
            message: error.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Apply {
            message: error.to_string(),
        })?;
    Ok(applied.iter().map(ToString::to_string).collect())
}

/// Async wrapper over [`run_pending_migrations_blocking`].
pub async fn run_pending_migrations(database_url: String) -> Result<(), MigrationError> {
    let applied =
        tokio::task::spawn_blocking(move || run_pending_migrations_blocking(&database_url))
            .await
            .map_err(|error| MigrationError::Aborted {
                message: error.to_string(),
            })??;
    if applied.is_empty() {
        info!("database schema is up to date");
    } else {
        info!(migrations = ?applied, "applied database migrations");
    }
    Ok(())
}
