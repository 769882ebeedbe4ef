//! Database module
//!
//! SQLite storage for the interaction log and the FAQ dataset.

pub mod repo;
pub mod schema;

pub use repo::Database;
