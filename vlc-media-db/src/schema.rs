//! SQLite schema creation and additive column migrations.

use std::path::Path;

use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A column that older databases may lack.
///
/// Migrations only ever add columns. They never rename, drop, or copy data,
/// so a superseded column (such as `outro_start`) stays next to its
/// successor (`credits_duration`).
#[derive(Debug, Clone, Copy)]
pub struct ColumnMigration {
    pub table: &'static str,
    pub column: &'static str,
    /// Column type and default, as written after `ADD COLUMN <name>`.
    pub definition: &'static str,
}

/// Ordered list of column additions, applied on every startup.
pub const COLUMN_MIGRATIONS: &[ColumnMigration] = &[
    ColumnMigration {
        table: "playback",
        column: "status",
        definition: "TEXT DEFAULT NULL",
    },
    ColumnMigration {
        table: "playback",
        column: "series_prefix",
        definition: "TEXT DEFAULT NULL",
    },
    ColumnMigration {
        table: "playback",
        column: "series_suffix",
        definition: "TEXT DEFAULT NULL",
    },
    ColumnMigration {
        table: "playback",
        column: "description",
        definition: "TEXT DEFAULT NULL",
    },
    ColumnMigration {
        table: "playback",
        column: "outro_triggered",
        definition: "INTEGER DEFAULT 0",
    },
    ColumnMigration {
        table: "series_settings",
        column: "intro_start",
        definition: "INTEGER DEFAULT NULL",
    },
    ColumnMigration {
        table: "series_settings",
        column: "intro_end",
        definition: "INTEGER DEFAULT NULL",
    },
    ColumnMigration {
        table: "series_settings",
        column: "outro_start",
        definition: "INTEGER DEFAULT NULL",
    },
    ColumnMigration {
        table: "series_settings",
        column: "credits_duration",
        definition: "INTEGER DEFAULT NULL",
    },
    ColumnMigration {
        table: "series_settings",
        column: "description",
        definition: "TEXT DEFAULT NULL",
    },
];

/// Create both tables if missing and add any columns older databases lack.
///
/// Idempotent; run on every startup. Each column addition
/// is its own statement.
pub fn initialize(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    for migration in COLUMN_MIGRATIONS {
        apply_migration(conn, migration)?;
    }
    Ok(())
}

/// Open or create a media database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    initialize(&conn)?;
    log::debug!("Opened media database at {}", path.display());
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    initialize(&conn)?;
    Ok(conn)
}

/// Whether `table` currently has a column named `column`.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2)",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Add a single column if it is missing. Returns whether it was added.
fn apply_migration(conn: &Connection, migration: &ColumnMigration) -> Result<bool, SchemaError> {
    if column_exists(conn, migration.table, migration.column)? {
        return Ok(false);
    }
    conn.execute_batch(&format!(
        "ALTER TABLE {} ADD COLUMN {} {};",
        migration.table, migration.column, migration.definition
    ))?;
    log::debug!(
        "Added column {}.{} ({})",
        migration.table,
        migration.column,
        migration.definition
    );
    Ok(true)
}

const SCHEMA_SQL: &str = r#"
-- Playback progress, one row per file path
CREATE TABLE IF NOT EXISTS playback (
    filename TEXT PRIMARY KEY,
    position INTEGER,
    duration INTEGER,
    percent INTEGER,
    status TEXT DEFAULT NULL,
    series_prefix TEXT DEFAULT NULL,
    series_suffix TEXT DEFAULT NULL,
    description TEXT DEFAULT NULL,
    outro_triggered INTEGER DEFAULT 0
);

-- Per-series skip and autoplay configuration
CREATE TABLE IF NOT EXISTS series_settings (
    series_prefix TEXT NOT NULL,
    series_suffix TEXT NOT NULL,
    autoplay BOOLEAN DEFAULT 0,
    skip_intro BOOLEAN DEFAULT 0,
    skip_outro BOOLEAN DEFAULT 0,
    intro_start INTEGER DEFAULT NULL,
    intro_end INTEGER DEFAULT NULL,
    outro_start INTEGER DEFAULT NULL,
    credits_duration INTEGER DEFAULT NULL,
    description TEXT DEFAULT NULL,
    PRIMARY KEY (series_prefix, series_suffix)
);
"#;
