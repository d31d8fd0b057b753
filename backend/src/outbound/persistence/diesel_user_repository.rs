//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each operation is a single statement on a pooled connection, raced against
//! the caller's [`RequestContext`]. Writes use `RETURNING` so the stored row
//! comes back in the same round trip.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{RequestContext, User, UserId, UserRequest};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    /// Create a repository stamping rows with the system clock.
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Create a repository with an injected clock.
    pub fn with_clock(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row).map_err(|err| {
        debug!(user_id = id, %err, "stored user row failed validation");
        UserPersistenceError::io(format!("user row {id} is invalid: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, UserPersistenceError> {
        ctx.run(async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<UserRow> = users::table
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            debug!(count = rows.len(), "listed users");
            rows.into_iter().map(row_to_user).collect()
        })
        .await?
    }

    async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, UserPersistenceError> {
        ctx.run(async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: UserRow = users::table
                .find(id.as_i64())
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .map_err(|err| map_row_error(err, id))?;
            row_to_user(row)
        })
        .await?
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        request: &UserRequest,
    ) -> Result<User, UserPersistenceError> {
        ctx.run(async {
            let now = self.clock.utc();
            let new_row = NewUserRow {
                name: request.name().as_ref(),
                email: request.email().as_ref(),
                created_at: now,
                updated_at: now,
            };
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: UserRow = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            debug!(user_id = row.id, "created user");
            row_to_user(row)
        })
        .await?
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        request: &UserRequest,
    ) -> Result<User, UserPersistenceError> {
        ctx.run(async {
            let changes = UserChangeset {
                name: request.name().as_ref(),
                email: request.email().as_ref(),
                updated_at: self.clock.utc(),
            };
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: UserRow = diesel::update(users::table.find(id.as_i64()))
                .set(&changes)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|err| map_row_error(err, id))?;
            debug!(user_id = row.id, "updated user");
            row_to_user(row)
        })
        .await?
    }

    async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<(), UserPersistenceError> {
        ctx.run(async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let affected = diesel::delete(users::table.find(id.as_i64()))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            if affected == 0 {
                return Err(UserPersistenceError::not_found(id));
            }
            debug!(user_id = %id, "deleted user");
            Ok(())
        })
        .await?
    }
}
