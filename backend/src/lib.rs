//! Users backend: a REST API over a single `User` resource stored in
//! PostgreSQL.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the user model and
//! the [`domain::ports::UserRepository`] port, [`outbound`] implements the
//! port with Diesel, and [`inbound`] exposes it over HTTP with actix-web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
