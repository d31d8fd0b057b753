//! Port abstraction for user persistence adapters and their errors.
//!
//! Any store implementing [`UserRepository`] is interchangeable from the HTTP
//! handlers' point of view. Adapters must report a missing row as
//! [`UserPersistenceError::NotFound`] and every other backend failure as
//! [`UserPersistenceError::Io`].
use async_trait::async_trait;

use crate::domain::{ContextError, RequestContext, User, UserId, UserRequest};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// No user exists with the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
        /// Connection, checkout, constraint, query or decoding failure.
        Io { message: String } => "user repository i/o failed: {message}",
        /// The request context was cancelled or expired mid-operation.
        Cancelled { message: String } => "user repository call cancelled: {message}",
    }
}

impl UserPersistenceError {
    /// True when the error reports a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ContextError> for UserPersistenceError {
    fn from(value: ContextError) -> Self {
        Self::cancelled(value.to_string())
    }
}

/// Store for the user resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by ascending identifier.
    ///
    /// A failure part way through yields an error, never a partial list.
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch exactly one user by identifier.
    async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, UserPersistenceError>;

    /// Insert a user, stamping both timestamps from a single clock read.
    async fn create(
        &self,
        ctx: &RequestContext,
        request: &UserRequest,
    ) -> Result<User, UserPersistenceError>;

    /// Replace name and email, refreshing `updated_at` only.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        request: &UserRequest,
    ) -> Result<User, UserPersistenceError>;

    /// Remove a user by identifier.
    async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<(), UserPersistenceError>;
}
