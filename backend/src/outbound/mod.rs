//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user store using Diesel
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules of their own.

pub mod persistence;
