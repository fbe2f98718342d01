//! Database integration: seeding, inspection and reset.
//!
//! The [`Seeder`] inserts generated rows inside one transaction and reports
//! per-table counts; the [`Inspector`] renders table contents as text.

mod inspector;
mod seeder;

pub use inspector::{COLUMN_WIDTH, InspectError, Inspector, ROW_LIMIT, TableView, format_cell};
pub use seeder::{SeedError, SeedReport, Seeder};
