//! SQLite bootstrap for the durable key-value medium.
//!
//! # Responsibility
//! - Open and configure the SQLite connection that backs every tracker store.
//! - Apply schema migrations before any store reads or writes.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Stores must not touch `kv_entries` before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Result of opening or migrating the tracker database.
pub type DbResult<T> = Result<T, DbError>;

/// Failures raised while opening or migrating the tracker database, the
/// SQLite file that holds the `annees`, `equipe` and `jours` snapshots.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open, configure or migrate the file (I/O, locking,
    /// corruption, disk full).
    Sqlite(rusqlite::Error),
    /// The file was written by a newer leavetrack release; opening it could
    /// misread snapshots whose layout this binary does not know.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "tracker database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "tracker database schema version {db_version} is newer than supported {latest_supported}; upgrade leavetrack"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
