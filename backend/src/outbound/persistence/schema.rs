//! Diesel table definitions.
//!
//! Kept in sync with `backend/migrations`. Regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Users managed through the REST API.
    users (id) {
        /// Primary key drawn from the `users_id_seq` sequence.
        id -> Int8,
        name -> Varchar,
        /// Not unique.
        email -> Varchar,
        /// Set once on insert.
        created_at -> Timestamptz,
        /// Refreshed by every successful update.
        updated_at -> Timestamptz,
    }
}
