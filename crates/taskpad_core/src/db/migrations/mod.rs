//! Schema migration registry.
//!
//! Migrations are ordered SQL batches keyed by the `user_version` value they
//! bring the database up to. The pending tail runs inside one transaction, so
//! a half-applied upgrade never survives a crash.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_kv.sql"))];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to [`latest_version`].
///
/// A database stamped with a version this build does not know is refused
/// rather than guessed at.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stamped = schema_version(conn)?;
    let latest = latest_version();

    if stamped > latest {
        return Err(DbError::SchemaTooNew {
            found: stamped,
            supported: latest,
        });
    }
    if stamped == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > stamped) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
