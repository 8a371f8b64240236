//! SQLite bootstrap for the key-value database.
//!
//! # Responsibility
//! - Open the database file (or an in-memory instance) behind the key-value
//!   facility and bring its schema up to date.
//!
//! # Invariants
//! - The applied schema version lives in `PRAGMA user_version`.
//! - No application data is read or written before migrations succeed.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Database-layer failure.
#[derive(Debug)]
pub enum DbError {
    /// The SQLite driver reported an error.
    Sqlite(rusqlite::Error),
    /// The file was stamped by a newer build; refusing to touch it.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite failure: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "schema version {found} comes from a newer build (this one supports up to {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
