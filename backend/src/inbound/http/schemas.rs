//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their
//! serialised shape and register under the domain names (`User`, `Error`,
//! `ErrorCode`) so the published contract reads naturally.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user 42 not found")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as `{ "field": "email", "code": "invalid_email" }`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Server-assigned identifier.
    #[schema(example = 1, minimum = 1)]
    id: i64,
    #[schema(example = "Ada Lovelace", max_length = 255)]
    name: String,
    #[schema(example = "ada@example.com", max_length = 255)]
    email: String,
    /// Creation time, RFC 3339 UTC. Never changes.
    #[schema(format = DateTime, example = "2024-06-01T12:00:00Z")]
    created_at: String,
    /// Time of the last successful update, RFC 3339 UTC.
    #[schema(format = DateTime, example = "2024-06-01T12:00:00Z")]
    updated_at: String,
}
