//! StayFit fitness-diary schema.
//!
//! Owns the SQL migrations for the eleven application tables, the domain enums
//! with their database spellings, and the credential hashing used for stored
//! passwords and session tokens.

pub mod auth;
pub mod errors;
pub mod models;

pub use models::Table;

/// Embedded migrations creating the StayFit schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
