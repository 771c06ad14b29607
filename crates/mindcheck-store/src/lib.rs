//! mindcheck-store — SQLite persistence for mindcheck.
//!
//! Implements the `QuizStore` trait over a single SQLite connection, with the
//! schema created on open and every write wrapped in a transaction.

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::SqliteStoreError;
pub use sqlite::SqliteStore;
