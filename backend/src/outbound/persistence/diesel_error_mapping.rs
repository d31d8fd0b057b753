//! Translation of pool and Diesel failures into user persistence errors.

use diesel::result::Error as DieselError;
use tracing::debug;

use crate::domain::UserId;
use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    debug!(%error, "user store connection checkout failed");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    UserPersistenceError::io(message)
}

/// Map a Diesel failure, reporting a missing row as `NotFound` for `id`.
pub(super) fn map_row_error(error: DieselError, id: UserId) -> UserPersistenceError {
    match error {
        DieselError::NotFound => UserPersistenceError::not_found(id),
        other => map_diesel_error(other),
    }
}

/// Map a Diesel failure where no single row was targeted.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    let message = match error {
        DieselError::DatabaseError(kind, info) => format!("{kind:?}: {}", info.message()),
        other => other.to_string(),
    };
    UserPersistenceError::io(message)
}
