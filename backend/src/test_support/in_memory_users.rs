//! In-memory [`UserRepository`] for handler and end-to-end HTTP tests.
//!
//! Mirrors the PostgreSQL adapter's observable behaviour: ids start at 1 and
//! are never reused, `list` ascends by id, both timestamps come from one clock
//! read on create, and every call runs under the request context.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{RequestContext, User, UserId, UserRequest};

#[derive(Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

/// Thread-safe user store backed by a `BTreeMap`.
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            clock,
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().map(|table| table.rows.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::io("in-memory user table poisoned"))
    }

    fn stamp(
        id: UserId,
        request: &UserRequest,
        created_at: chrono::DateTime<chrono::Utc>,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<User, UserPersistenceError> {
        User::try_new(
            id,
            request.name().clone(),
            request.email().clone(),
            created_at,
            updated_at,
        )
        .map_err(|err| UserPersistenceError::io(err.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<User>, UserPersistenceError> {
        ctx.run(async {
            let table = self.lock()?;
            Ok(table.rows.values().cloned().collect())
        })
        .await?
    }

    async fn get(&self, ctx: &RequestContext, id: UserId) -> Result<User, UserPersistenceError> {
        ctx.run(async {
            let table = self.lock()?;
            table
                .rows
                .get(&id)
                .cloned()
                .ok_or_else(|| UserPersistenceError::not_found(id))
        })
        .await?
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        request: &UserRequest,
    ) -> Result<User, UserPersistenceError> {
        ctx.run(async {
            let mut table = self.lock()?;
            let next = table.last_id + 1;
            let id = UserId::new(next).map_err(|err| UserPersistenceError::io(err.to_string()))?;
            let now = self.clock.utc();
            let user = Self::stamp(id, request, now, now)?;
            table.last_id = next;
            table.rows.insert(id, user.clone());
            Ok(user)
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
            let mut table = self.lock()?;
            let created_at = table
                .rows
                .get(&id)
                .map(User::created_at)
                .ok_or_else(|| UserPersistenceError::not_found(id))?;
            let user = Self::stamp(id, request, created_at, self.clock.utc())?;
            table.rows.insert(id, user.clone());
            Ok(user)
        })
        .await?
    }

    async fn delete(&self, ctx: &RequestContext, id: UserId) -> Result<(), UserPersistenceError> {
        ctx.run(async {
            let mut table = self.lock()?;
            table
                .rows
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| UserPersistenceError::not_found(id))
        })
        .await?
    }
}
