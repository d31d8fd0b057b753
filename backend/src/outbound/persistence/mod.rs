//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the user repository port backed by PostgreSQL
//! via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapter**: the repository only translates between Diesel rows
//!   and domain types. Validation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: every database failure is mapped onto
//!   `UserPersistenceError`.
//!
//! # Example
//!
//! ```no_run
//! use users_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
