//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open the imported reference database read-only.
//! - Build in-memory databases carrying the reference schema.
//!
//! # Invariants
//! - Connections returned by `open_db` are read-only.
//! - Every returned connection has passed schema verification.

use super::schema::{apply_schema, verify_schema};
use super::DbResult;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens an imported reference database file in read-only mode.
///
/// # Side effects
/// - Verifies required tables and columns.
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - Returns `DbError::Sqlite` when the file cannot be opened.
/// - Returns `DbError::MissingRequiredTable`/`MissingRequiredColumn` when the
///   file was not produced by a compatible import.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let verified = conn
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(Into::into)
        .and_then(|()| verify_schema(&conn));
    match verified {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_schema_invalid error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory database with the reference schema applied.
///
/// The database starts empty; callers seed it (fixtures, import tooling).
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = Connection::open_in_memory()?;
    match apply_schema(&conn).and_then(|()| verify_schema(&conn)) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
