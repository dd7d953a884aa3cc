//! Playback progress operations on the `playback` table.

use std::collections::{HashMap, HashSet};

use rusqlite::{params, params_from_iter, Connection, Row};

use crate::error::OperationError;
use crate::types::{PlaybackProgress, PlaybackUpdate, WatchStatus};

/// Keys per `IN (...)` query, well below SQLite's bound-parameter limit.
const BATCH_CHUNK: usize = 500;

// ── Single-file Operations ──────────────────────────────────────────────────

/// Insert or overwrite the progress row for a file.
///
/// Status is recomputed from `percent`. Omitted series keys are stored as
/// NULL. `outro_triggered` is left as it was on an existing row.
pub fn save_playback(conn: &Connection, update: &PlaybackUpdate) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO playback (filename, position, duration, percent, status, series_prefix, series_suffix)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(filename) DO UPDATE SET
             position = excluded.position,
             duration = excluded.duration,
             percent = excluded.percent,
             status = excluded.status,
             series_prefix = excluded.series_prefix,
             series_suffix = excluded.series_suffix",
        params![
            update.filename,
            update.position,
            update.duration,
            update.percent,
            update.status().map(|s| s.as_str()),
            update.series_prefix,
            update.series_suffix,
        ],
    )?;
    Ok(())
}

/// Fetch stored progress for a file, or `None` if it was never saved.
pub fn get_playback(
    conn: &Connection,
    filename: &str,
) -> Result<Option<PlaybackProgress>, OperationError> {
    let result = conn.query_row(
        "SELECT position, duration, percent,
                COALESCE(series_prefix, ''),
                COALESCE(series_suffix, '')
         FROM playback WHERE filename = ?1",
        params![filename],
        |row| {
            Ok(PlaybackProgress {
                position: row.get(0)?,
                duration: row.get(1)?,
                percent: row.get(2)?,
                series_prefix: row.get(3)?,
                series_suffix: row.get(4)?,
            })
        },
    );
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Watched percent for a file. Unknown files (and rows without progress) read as 0.
pub fn get_playback_percent(conn: &Connection, filename: &str) -> Result<i64, OperationError> {
    let result = conn.query_row(
        "SELECT percent FROM playback WHERE filename = ?1",
        params![filename],
        |row| row.get::<_, Option<i64>>(0),
    );
    match result {
        Ok(percent) => Ok(percent.unwrap_or(0)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Stored status for a file, `None` when unknown or not started.
pub fn get_playback_status(
    conn: &Connection,
    filename: &str,
) -> Result<Option<WatchStatus>, OperationError> {
    let result = conn.query_row(
        "SELECT status FROM playback WHERE filename = ?1",
        params![filename],
        |row| row.get::<_, Option<String>>(0),
    );
    match result {
        Ok(status) => Ok(status.as_deref().and_then(WatchStatus::from_db)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Batch Lookups ───────────────────────────────────────────────────────────

/// Percent for each file in `directory`.
///
/// Rows are matched on the joined path `directory/filename`. Every distinct
/// requested name gets exactly one entry, in request order, with 0 for files
/// that have no row.
pub fn get_playback_batch<S: AsRef<str>>(
    conn: &Connection,
    directory: &str,
    filenames: &[S],
) -> Result<Vec<(String, i64)>, OperationError> {
    let names = distinct(filenames);
    let paths: Vec<String> = names
        .iter()
        .map(|name| format!("{}/{}", directory, name))
        .collect();
    let found = lookup_many(conn, "percent", &paths, |row| {
        Ok(row.get::<_, Option<i64>>(1)?.unwrap_or(0))
    })?;

    Ok(names
        .iter()
        .zip(&paths)
        .map(|(name, path)| (name.to_string(), found.get(path).copied().unwrap_or(0)))
        .collect())
}

/// Status for each requested file.
///
/// Unlike [`get_playback_batch`], rows are matched on the bare filename; the
/// directory is accepted for call-site symmetry but not joined. Files with
/// no row or no status get `None`.
pub fn get_playback_batch_status<S: AsRef<str>>(
    conn: &Connection,
    _directory: &str,
    filenames: &[S],
) -> Result<Vec<(String, Option<WatchStatus>)>, OperationError> {
    let names = distinct(filenames);
    let keys: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    let found = lookup_many(conn, "status", &keys, |row| {
        Ok(row
            .get::<_, Option<String>>(1)?
            .as_deref()
            .and_then(WatchStatus::from_db))
    })?;

    Ok(keys
        .into_iter()
        .map(|name| {
            let status = found.get(&name).copied().flatten();
            (name, status)
        })
        .collect())
}

/// Look up `column` for many filenames, a chunk of keys per query.
fn lookup_many<T, F>(
    conn: &Connection,
    column: &'static str,
    keys: &[String],
    read: F,
) -> Result<HashMap<String, T>, OperationError>
where
    F: Fn(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut found = HashMap::with_capacity(keys.len());
    for chunk in keys.chunks(BATCH_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(",");
        let sql = format!(
            "SELECT filename, {} FROM playback WHERE filename IN ({})",
            column, placeholders
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
            Ok((row.get::<_, String>(0)?, read(row)?))
        })?;
        for row in rows {
            let (filename, value) = row?;
            found.insert(filename, value);
        }
    }
    Ok(found)
}

/// Drop repeated names while keeping first-seen order.
fn distinct<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .collect()
}

// ── Outro Flag ──────────────────────────────────────────────────────────────

/// Whether the end-of-episode action already fired for a file. False if unknown.
pub fn get_outro_triggered(conn: &Connection, filename: &str) -> Result<bool, OperationError> {
    let result = conn.query_row(
        "SELECT outro_triggered FROM playback WHERE filename = ?1",
        params![filename],
        |row| row.get::<_, Option<i64>>(0),
    );
    match result {
        Ok(flag) => Ok(flag.unwrap_or(0) != 0),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Set the outro flag, creating a bare row for the file if needed.
pub fn set_outro_triggered(
    conn: &Connection,
    filename: &str,
    triggered: bool,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO playback (filename, outro_triggered)
         VALUES (?1, ?2)
         ON CONFLICT(filename) DO UPDATE SET
             outro_triggered = excluded.outro_triggered",
        params![filename, triggered],
    )?;
    Ok(())
}
