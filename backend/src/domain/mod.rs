//! Domain primitives, aggregates and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers. Types are immutable once built and document their invariants and
//! serde contracts in their own Rustdoc.
//!
//! Public surface:
//! - `User`, `UserId`, `UserName`, `EmailAddress`, `UserRequest`: the user
//!   resource and its validated inputs.
//! - `RequestContext`: cancellation and deadline for one store call.
//! - `Error`, `ErrorCode`: transport-agnostic API error payload.
//! - `TraceId`: task-local request correlation identifier.
//! - `ports`: traits implemented by outbound adapters.

pub mod context;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::context::{ContextError, RequestContext};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, USER_NAME_MAX, User, UserId, UserName, UserRequest,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use users_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
