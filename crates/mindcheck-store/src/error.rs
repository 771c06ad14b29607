//! SQLite store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`SqliteStore`](crate::SqliteStore) before they are
/// classified for the core.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// The database file could not be opened or created.
    #[error("failed to open database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Creating the tables failed.
    #[error("failed to initialise schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Any other SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl SqliteStoreError {
    /// Returns `true` for a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        self.constraint_code() == Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
    }

    /// Returns `true` for a FOREIGN KEY constraint violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.constraint_code() == Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
    }

    fn constraint_code(&self) -> Option<std::ffi::c_int> {
        match self {
            SqliteStoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Some(err.extended_code)
            }
            _ => None,
        }
    }
}
