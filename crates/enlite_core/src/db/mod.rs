//! SQLite storage bootstrap for the reference database.
//!
//! # Responsibility
//! - Open read-only connections to an imported reference database.
//! - Own the reference schema contract and verify it before use.
//!
//! # Invariants
//! - Core code never writes to a database opened with [`open_db`].
//! - Core code must not query reference data before schema verification succeeds.
//!
//! # See also
//! - `db/schema.sql`

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A table required by the reference schema is absent.
    MissingRequiredTable(&'static str),
    /// A table exists but lacks a column the core queries.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "reference database is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "reference table `{table}` is missing required column `{column}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
