//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Stored text is returned
//! as written; only the id and timestamp ordering are checked when a row
//! becomes a `User`.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{EmailAddress, User, UserId, UserName, UserValidationError};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for full replacement of the mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_new(
            UserId::new(row.id)?,
            UserName::from_stored(row.name),
            EmailAddress::from_stored(row.email),
            row.created_at,
            row.updated_at,
        )
    }
}
