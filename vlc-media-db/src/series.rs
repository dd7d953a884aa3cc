//! Series settings and skip-marker operations on the `series_settings` table.
//!
//! Marker setters touch only their own columns: each one is a single
//! `INSERT ... ON CONFLICT DO UPDATE` that creates a default row when the
//! series is new and otherwise leaves every other column alone.

use rusqlite::{params, Connection};

use crate::error::{ensure_intro_range, ensure_non_negative, OperationError};
use crate::types::{ClearScope, OtherVersion, SeriesSettings, SkipMarkers};

// ── Full Settings ───────────────────────────────────────────────────────────

/// Insert or overwrite all settings for a series.
pub fn save_series_settings(
    conn: &Connection,
    settings: &SeriesSettings,
) -> Result<(), OperationError> {
    if let Some(start) = settings.intro_start {
        ensure_non_negative("intro start", start)?;
    }
    if let Some(end) = settings.intro_end {
        ensure_non_negative("intro end", end)?;
    }
    if let (Some(start), Some(end)) = (settings.intro_start, settings.intro_end) {
        ensure_intro_range(start, end)?;
    }
    if let Some(duration) = settings.credits_duration {
        ensure_non_negative("credits duration", duration)?;
    }

    conn.execute(
        "INSERT INTO series_settings (series_prefix, series_suffix, autoplay, skip_intro,
             skip_outro, intro_start, intro_end, credits_duration)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(series_prefix, series_suffix) DO UPDATE SET
             autoplay = excluded.autoplay,
             skip_intro = excluded.skip_intro,
             skip_outro = excluded.skip_outro,
             intro_start = excluded.intro_start,
             intro_end = excluded.intro_end,
             credits_duration = excluded.credits_duration",
        params![
            settings.series_prefix,
            settings.series_suffix,
            settings.autoplay,
            settings.skip_intro,
            settings.skip_outro,
            settings.intro_start,
            settings.intro_end,
            settings.credits_duration,
        ],
    )?;
    Ok(())
}

/// Fetch settings for a series, or `None` if the series has no row.
pub fn get_series_settings(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
) -> Result<Option<SeriesSettings>, OperationError> {
    let result = conn.query_row(
        "SELECT series_prefix, series_suffix, autoplay, skip_intro, skip_outro,
                intro_start, intro_end, credits_duration
         FROM series_settings WHERE series_prefix = ?1 AND series_suffix = ?2",
        params![prefix, suffix],
        |row| {
            Ok(SeriesSettings {
                series_prefix: row.get(0)?,
                series_suffix: row.get(1)?,
                autoplay: row.get::<_, Option<bool>>(2)?.unwrap_or(false),
                skip_intro: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
                skip_outro: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
                intro_start: row.get(5)?,
                intro_end: row.get(6)?,
                credits_duration: row.get(7)?,
            })
        },
    );
    match result {
        Ok(s) => Ok(Some(s)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether a settings row exists for the series.
pub fn series_settings_exist(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM series_settings WHERE series_prefix = ?1 AND series_suffix = ?2)",
        params![prefix, suffix],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Skip Markers ────────────────────────────────────────────────────────────

/// Intro range and credits duration for a series.
pub fn get_skip_markers(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
) -> Result<Option<SkipMarkers>, OperationError> {
    let result = conn.query_row(
        "SELECT intro_start, intro_end, credits_duration
         FROM series_settings WHERE series_prefix = ?1 AND series_suffix = ?2",
        params![prefix, suffix],
        |row| {
            Ok(SkipMarkers {
                intro_start: row.get(0)?,
                intro_end: row.get(1)?,
                credits_duration: row.get(2)?,
            })
        },
    );
    match result {
        Ok(m) => Ok(Some(m)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Set the intro range. Rejects negative values and `end <= start`.
pub fn set_intro_markers(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
    start: i64,
    end: i64,
) -> Result<(), OperationError> {
    ensure_intro_range(start, end)?;
    conn.execute(
        "INSERT INTO series_settings (series_prefix, series_suffix, autoplay, skip_intro,
             skip_outro, intro_start, intro_end)
         VALUES (?1, ?2, 0, 0, 0, ?3, ?4)
         ON CONFLICT(series_prefix, series_suffix) DO UPDATE SET
             intro_start = excluded.intro_start,
             intro_end = excluded.intro_end",
        params![prefix, suffix, start, end],
    )?;
    Ok(())
}

/// Set the legacy outro start marker.
pub fn set_outro_marker(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
    start: i64,
) -> Result<(), OperationError> {
    ensure_non_negative("outro start", start)?;
    conn.execute(
        "INSERT INTO series_settings (series_prefix, series_suffix, autoplay, skip_intro,
             skip_outro, outro_start)
         VALUES (?1, ?2, 0, 0, 0, ?3)
         ON CONFLICT(series_prefix, series_suffix) DO UPDATE SET
             outro_start = excluded.outro_start",
        params![prefix, suffix, start],
    )?;
    Ok(())
}

/// Legacy outro start marker, `None` when unset or the series is unknown.
pub fn get_outro_marker(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT outro_start FROM series_settings WHERE series_prefix = ?1 AND series_suffix = ?2",
        params![prefix, suffix],
        |row| row.get::<_, Option<i64>>(0),
    );
    match result {
        Ok(start) => Ok(start),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Null out markers for a series. Clearing an unknown series is a no-op.
///
/// [`ClearScope::Outro`] resets only `outro_start`; `credits_duration` is
/// never touched here.
pub fn clear_skip_markers(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
    scope: ClearScope,
) -> Result<(), OperationError> {
    let sql = match scope {
        ClearScope::Intro => {
            "UPDATE series_settings SET intro_start = NULL, intro_end = NULL
             WHERE series_prefix = ?1 AND series_suffix = ?2"
        }
        ClearScope::Outro => {
            "UPDATE series_settings SET outro_start = NULL
             WHERE series_prefix = ?1 AND series_suffix = ?2"
        }
        ClearScope::All => {
            "UPDATE series_settings SET intro_start = NULL, intro_end = NULL, outro_start = NULL
             WHERE series_prefix = ?1 AND series_suffix = ?2"
        }
    };
    let changed = conn.execute(sql, params![prefix, suffix])?;
    log::debug!("Cleared {} markers on {} row(s)", scope, changed);
    Ok(())
}

// ── Credits ─────────────────────────────────────────────────────────────────

/// Seconds of trailing credits to skip. `None` when unset or the series is unknown.
pub fn get_credits_duration(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT credits_duration FROM series_settings WHERE series_prefix = ?1 AND series_suffix = ?2",
        params![prefix, suffix],
        |row| row.get::<_, Option<i64>>(0),
    );
    match result {
        Ok(duration) => Ok(duration),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Set the credits duration for a series.
pub fn set_credits_duration(
    conn: &Connection,
    prefix: &str,
    suffix: &str,
    duration: i64,
) -> Result<(), OperationError> {
    ensure_non_negative("credits duration", duration)?;
    conn.execute(
        "INSERT INTO series_settings (series_prefix, series_suffix, autoplay, skip_intro,
             skip_outro, credits_duration)
         VALUES (?1, ?2, 0, 0, 0, ?3)
         ON CONFLICT(series_prefix, series_suffix) DO UPDATE SET
             credits_duration = excluded.credits_duration",
        params![prefix, suffix, duration],
    )?;
    Ok(())
}

// ── Versions ────────────────────────────────────────────────────────────────

/// Other suffixes played under `prefix`, excluding `exclude_suffix`.
///
/// A NULL suffix is treated as the empty string. For each suffix, reports the
/// most recently inserted file (highest rowid) and the highest percent seen.
pub fn find_other_versions(
    conn: &Connection,
    prefix: &str,
    exclude_suffix: &str,
) -> Result<Vec<OtherVersion>, OperationError> {
    let mut stmt = conn.prepare(
        "WITH versions AS (
             SELECT rowid AS rid, filename, percent, COALESCE(series_suffix, '') AS suffix
             FROM playback WHERE series_prefix = ?1
         )
         SELECT v.suffix,
                (SELECT l.filename FROM versions l
                 WHERE l.suffix = v.suffix
                 ORDER BY l.rid DESC LIMIT 1),
                COALESCE(MAX(v.percent), 0)
         FROM versions v
         WHERE v.suffix != ?2
         GROUP BY v.suffix
         ORDER BY v.suffix",
    )?;
    let rows = stmt.query_map(params![prefix, exclude_suffix], |row| {
        Ok(OtherVersion {
            suffix: row.get(0)?,
            last_filename: row.get(1)?,
            max_percent: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
