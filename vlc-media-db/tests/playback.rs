use rusqlite::Connection;
use vlc_media_db::*;

fn update(filename: &str, position: i64, percent: i64) -> PlaybackUpdate {
    PlaybackUpdate {
        filename: filename.to_string(),
        position,
        duration: 100,
        percent,
        series_prefix: None,
        series_suffix: None,
    }
}

fn episode(filename: &str, percent: i64, prefix: &str, suffix: Option<&str>) -> PlaybackUpdate {
    PlaybackUpdate {
        filename: filename.to_string(),
        position: percent * 10,
        duration: 1000,
        percent,
        series_prefix: Some(prefix.to_string()),
        series_suffix: suffix.map(str::to_string),
    }
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM playback", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn save_and_get_playback() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &episode("/tv/ep1.mkv", 3, "Show.S01", Some("1080p.mkv"))).unwrap();

    let progress = get_playback(&conn, "/tv/ep1.mkv").unwrap().unwrap();
    assert_eq!(
        progress,
        PlaybackProgress {
            position: Some(30),
            duration: Some(1000),
            percent: Some(3),
            series_prefix: "Show.S01".to_string(),
            series_suffix: "1080p.mkv".to_string(),
        }
    );
}

#[test]
fn missing_series_keys_read_as_empty() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("movie.mkv", 10, 10)).unwrap();

    let progress = get_playback(&conn, "movie.mkv").unwrap().unwrap();
    assert_eq!(progress.series_prefix, "");
    assert_eq!(progress.series_suffix, "");
}

#[test]
fn get_playback_unknown_is_none() {
    let conn = open_memory().unwrap();
    assert_eq!(get_playback(&conn, "nope.mkv").unwrap(), None);
}

#[test]
fn upsert_overwrites_single_row() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("a.mkv", 10, 10)).unwrap();
    save_playback(&conn, &update("a.mkv", 50, 50)).unwrap();

    assert_eq!(row_count(&conn), 1);
    let progress = get_playback(&conn, "a.mkv").unwrap().unwrap();
    assert_eq!(progress.position, Some(50));
    assert_eq!(progress.percent, Some(50));
    assert_eq!(
        get_playback_status(&conn, "a.mkv").unwrap(),
        Some(WatchStatus::Partial)
    );
}

#[test]
fn save_playback_is_idempotent() {
    let conn = open_memory().unwrap();
    let u = episode("b.mkv", 95, "Show", Some("S01"));
    save_playback(&conn, &u).unwrap();
    let first = get_playback(&conn, "b.mkv").unwrap();
    save_playback(&conn, &u).unwrap();

    assert_eq!(row_count(&conn), 1);
    assert_eq!(get_playback(&conn, "b.mkv").unwrap(), first);
}

#[test]
fn status_follows_percent_on_every_write() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("c.mkv", 0, 0)).unwrap();
    assert_eq!(get_playback_status(&conn, "c.mkv").unwrap(), None);

    save_playback(&conn, &update("c.mkv", 90, 90)).unwrap();
    assert_eq!(
        get_playback_status(&conn, "c.mkv").unwrap(),
        Some(WatchStatus::Watched)
    );

    // Rewatching may move progress backward.
    save_playback(&conn, &update("c.mkv", 5, 5)).unwrap();
    assert_eq!(
        get_playback_status(&conn, "c.mkv").unwrap(),
        Some(WatchStatus::Partial)
    );
}

#[test]
fn save_clears_omitted_series_keys() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &episode("d.mkv", 20, "Show", Some("S01"))).unwrap();
    save_playback(&conn, &update("d.mkv", 30, 30)).unwrap();

    let progress = get_playback(&conn, "d.mkv").unwrap().unwrap();
    assert_eq!(progress.series_prefix, "");
    assert_eq!(progress.series_suffix, "");
}

#[test]
fn percent_and_status_default_for_unknown_file() {
    let conn = open_memory().unwrap();
    assert_eq!(get_playback_percent(&conn, "ghost.mkv").unwrap(), 0);
    assert_eq!(get_playback_status(&conn, "ghost.mkv").unwrap(), None);

    save_playback(&conn, &update("seen.mkv", 72, 72)).unwrap();
    assert_eq!(get_playback_percent(&conn, "seen.mkv").unwrap(), 72);
}

#[test]
fn batch_fills_missing_with_zero() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("/media/tv/x.mkv", 40, 40)).unwrap();

    let result = get_playback_batch(&conn, "/media/tv", &["x.mkv", "y.mkv"]).unwrap();
    assert_eq!(
        result,
        vec![("x.mkv".to_string(), 40), ("y.mkv".to_string(), 0)]
    );
}

#[test]
fn batch_matches_joined_path_only() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("x.mkv", 40, 40)).unwrap();
    save_playback(&conn, &update("/other/x.mkv", 60, 60)).unwrap();

    let result = get_playback_batch(&conn, "/media/tv", &["x.mkv"]).unwrap();
    assert_eq!(result, vec![("x.mkv".to_string(), 0)]);
}

#[test]
fn batch_deduplicates_and_handles_empty_input() {
    let conn = open_memory().unwrap();
    let empty: [&str; 0] = [];
    assert!(get_playback_batch(&conn, "/d", &empty).unwrap().is_empty());

    let result = get_playback_batch(&conn, "/d", &["a.mkv", "a.mkv"]).unwrap();
    assert_eq!(result.len(), 1);
}

#[test]
fn batch_spans_multiple_chunks() {
    let conn = open_memory().unwrap();
    let names: Vec<String> = (0..1200).map(|i| format!("ep{:04}.mkv", i)).collect();
    for (i, name) in names.iter().enumerate().step_by(100) {
        save_playback(&conn, &update(&format!("/lib/{}", name), 1, (i % 100) as i64 + 1))
            .unwrap();
    }

    let result = get_playback_batch(&conn, "/lib", &names).unwrap();
    assert_eq!(result.len(), names.len());
    assert_eq!(result[0], ("ep0000.mkv".to_string(), 1));
    assert_eq!(result[1100], ("ep1100.mkv".to_string(), 1));
    assert_eq!(result[1].1, 0);
}

#[test]
fn batch_status_matches_bare_filename() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("x.mkv", 95, 95)).unwrap();
    save_playback(&conn, &update("/media/tv/y.mkv", 50, 50)).unwrap();

    let result =
        get_playback_batch_status(&conn, "/media/tv", &["x.mkv", "y.mkv", "z.mkv"]).unwrap();
    assert_eq!(
        result,
        vec![
            ("x.mkv".to_string(), Some(WatchStatus::Watched)),
            ("y.mkv".to_string(), None),
            ("z.mkv".to_string(), None),
        ]
    );
}

#[test]
fn outro_flag_defaults_to_false() {
    let conn = open_memory().unwrap();
    assert!(!get_outro_triggered(&conn, "ep.mkv").unwrap());

    save_playback(&conn, &update("ep.mkv", 10, 10)).unwrap();
    assert!(!get_outro_triggered(&conn, "ep.mkv").unwrap());
}

#[test]
fn set_outro_creates_bare_record() {
    let conn = open_memory().unwrap();
    set_outro_triggered(&conn, "new.mkv", true).unwrap();

    assert!(get_outro_triggered(&conn, "new.mkv").unwrap());
    let progress = get_playback(&conn, "new.mkv").unwrap().unwrap();
    assert_eq!(progress.position, None);
    assert_eq!(progress.percent, None);
    assert_eq!(get_playback_percent(&conn, "new.mkv").unwrap(), 0);
    assert_eq!(get_playback_status(&conn, "new.mkv").unwrap(), None);
}

#[test]
fn outro_flag_survives_progress_saves() {
    let conn = open_memory().unwrap();
    save_playback(&conn, &update("ep.mkv", 10, 10)).unwrap();
    set_outro_triggered(&conn, "ep.mkv", true).unwrap();
    save_playback(&conn, &update("ep.mkv", 95, 95)).unwrap();
    assert!(get_outro_triggered(&conn, "ep.mkv").unwrap());

    set_outro_triggered(&conn, "ep.mkv", false).unwrap();
    assert!(!get_outro_triggered(&conn, "ep.mkv").unwrap());
    assert_eq!(get_playback_percent(&conn, "ep.mkv").unwrap(), 95);
}

#[test]
fn store_rolls_back_failed_operation() {
    let mut store = MediaStore::open_memory().unwrap();
    let result: Result<(), OperationError> = store.run(|conn| {
        save_playback(conn, &update("rolled.mkv", 10, 10))?;
        set_intro_markers(conn, "Show", "S01", 20, 10)
    });
    assert!(result.is_err());
    assert_eq!(get_playback(store.connection(), "rolled.mkv").unwrap(), None);

    store
        .run(|conn| save_playback(conn, &update("kept.mkv", 10, 10)))
        .unwrap();
    assert!(get_playback(store.connection(), "kept.mkv").unwrap().is_some());
}
