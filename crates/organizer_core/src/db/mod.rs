//! Storage layer for the organizer: one SQLite table of named string blobs.
//!
//! # Responsibility
//! - Own the `kv_entries` schema that backs the task, note and habit
//!   collections, the daily habit marks and the preference entries.
//! - Hand out connections only after that schema is current.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the number of applied migrations.
//! - A database written by a newer build is refused, never downgraded.
//! - Repositories are built on migrated connections only.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding every persisted key-value entry.
pub const KV_TABLE: &str = "kv_entries";

pub type DbResult<T> = Result<T, DbError>;

/// Connection or schema failure while preparing storage.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected an open, pragma or migration statement.
    Sqlite(rusqlite::Error),
    /// The file carries more migrations than this build knows about.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "organizer database is at schema {db_version}, this build understands up to {latest_supported}; upgrade the binary"
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
