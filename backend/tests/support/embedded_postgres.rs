//! Embedded PostgreSQL helpers for integration tests.
//!
//! - Migrations run once into a template database named after a hash of the
//!   `migrations/` directory. Each test clones that template.
//! - Table teardown uses `postgres` directly to simulate schema loss.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use users_backend::outbound::persistence::run_pending_migrations_blocking;
use uuid::Uuid;

use super::format_postgres_error;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);
const TEMPLATE_NAME_PREFIX: &str = "users_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Returns the process-wide embedded cluster, retrying transient bootstrap
/// failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(format!("shared cluster: {error:?}"));
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

fn template_database_name() -> Result<String, String> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(dir).map_err(|error| format!("hash migrations: {error:?}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Creates the migrated template on first use and returns its name.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|error| format!("template check: {error:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|error| format!("create template: {error:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations_blocking(&url)
            .map_err(|error| format!("migrate template: {error}"))?;
    }
    Ok(template_name)
}

/// Clones a fresh database from the migrated template.
pub fn provision_migrated_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|error| format!("create database from template: {error:?}"))
}

/// Drops the `users` table from the given database URL.
pub fn drop_users_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("DROP TABLE IF EXISTS users;")
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}

/// Inserts a row directly, bypassing the store, and returns its id.
pub fn insert_raw_user(url: &str, name: &str, email: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(
            "INSERT INTO users (name, email, created_at, updated_at) \
             VALUES ($1, $2, now(), now()) RETURNING id",
            &[&name, &email],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
