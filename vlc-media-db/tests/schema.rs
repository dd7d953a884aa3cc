use rusqlite::Connection;
use vlc_media_db::schema::{column_exists, COLUMN_MIGRATIONS};
use vlc_media_db::{initialize, open_database, open_memory};

fn column_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1)",
        [table],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in ["playback", "series_settings"] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn fresh_schema_has_every_migrated_column() {
    let conn = open_memory().unwrap();
    for m in COLUMN_MIGRATIONS {
        assert!(
            column_exists(&conn, m.table, m.column).unwrap(),
            "{}.{} should exist",
            m.table,
            m.column
        );
    }
}

#[test]
fn initialize_is_idempotent() {
    let conn = open_memory().unwrap();
    let playback_cols = column_count(&conn, "playback");
    let series_cols = column_count(&conn, "series_settings");

    initialize(&conn).unwrap();
    initialize(&conn).unwrap();

    assert_eq!(column_count(&conn, "playback"), playback_cols);
    assert_eq!(column_count(&conn, "series_settings"), series_cols);
    assert_eq!(playback_cols, 9);
    assert_eq!(series_cols, 10);
}

#[test]
fn legacy_database_is_migrated_without_data_loss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE playback (
                 filename TEXT PRIMARY KEY,
                 position INTEGER,
                 duration INTEGER,
                 percent INTEGER,
                 series_prefix TEXT DEFAULT NULL,
                 series_suffix TEXT DEFAULT NULL
             );
             CREATE TABLE series_settings (
                 series_prefix TEXT NOT NULL,
                 series_suffix TEXT NOT NULL,
                 autoplay BOOLEAN DEFAULT 0,
                 skip_intro BOOLEAN DEFAULT 0,
                 skip_outro BOOLEAN DEFAULT 0,
                 intro_start INTEGER DEFAULT NULL,
                 intro_end INTEGER DEFAULT NULL,
                 outro_start INTEGER DEFAULT NULL,
                 PRIMARY KEY (series_prefix, series_suffix)
             );
             INSERT INTO playback VALUES ('/tv/ep1.mkv', 120, 3600, 3, 'Show', 'S01');
             INSERT INTO series_settings VALUES ('Show', 'S01', 1, 1, 0, 30, 90, 3300);",
        )
        .unwrap();
        assert!(!column_exists(&conn, "playback", "status").unwrap());
        assert!(!column_exists(&conn, "playback", "outro_triggered").unwrap());
        assert!(!column_exists(&conn, "series_settings", "credits_duration").unwrap());
    }

    let conn = open_database(&path).unwrap();
    for m in COLUMN_MIGRATIONS {
        assert!(column_exists(&conn, m.table, m.column).unwrap());
    }

    let (percent, status, triggered): (i64, Option<String>, i64) = conn
        .query_row(
            "SELECT percent, status, outro_triggered FROM playback WHERE filename = '/tv/ep1.mkv'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(percent, 3);
    assert_eq!(status, None);
    assert_eq!(triggered, 0);

    // The legacy column keeps its value; nothing is copied into the new one.
    let (outro_start, credits): (Option<i64>, Option<i64>) = conn
        .query_row(
            "SELECT outro_start, credits_duration FROM series_settings WHERE series_prefix = 'Show'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(outro_start, Some(3300));
    assert_eq!(credits, None);
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("media.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO playback (filename, percent) VALUES ('a.mkv', 40)",
            [],
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM playback", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
