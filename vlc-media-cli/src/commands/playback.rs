use std::io::Write;
use std::path::Path;

use vlc_media_db::PlaybackUpdate;

use super::{ok, open_store, Status};
use crate::cli_types::non_empty;
use crate::error::CliError;
use crate::output;

/// Raw `save_playback` arguments as parsed by clap.
pub(crate) struct SaveArgs {
    pub file: String,
    pub position: i64,
    pub duration: i64,
    pub percent: i64,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// Save progress for a file.
pub(crate) fn run_save_playback(
    db_path: &Path,
    out: &mut impl Write,
    args: SaveArgs,
) -> Result<Status, CliError> {
    let update = PlaybackUpdate {
        filename: args.file,
        position: args.position,
        duration: args.duration,
        percent: args.percent,
        series_prefix: non_empty(args.prefix),
        series_suffix: non_empty(args.suffix),
    };
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::save_playback(conn, &update))?;
    log::debug!("Saved {} at {}%", update.filename, update.percent);
    ok(out)
}

/// Print `position|duration|percent|prefix|suffix`, or exit 1 if unknown.
pub(crate) fn run_get_playback(
    db_path: &Path,
    out: &mut impl Write,
    file: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    match store.run(|conn| vlc_media_db::get_playback(conn, file))? {
        Some(progress) => {
            writeln!(out, "{}", output::playback_line(&progress))?;
            Ok(Status::Done)
        }
        None => Ok(Status::NotFound),
    }
}

pub(crate) fn run_get_percent(
    db_path: &Path,
    out: &mut impl Write,
    file: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let percent = store.run(|conn| vlc_media_db::get_playback_percent(conn, file))?;
    writeln!(out, "{}", percent)?;
    Ok(Status::Done)
}

pub(crate) fn run_get_status(
    db_path: &Path,
    out: &mut impl Write,
    file: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let status = store.run(|conn| vlc_media_db::get_playback_status(conn, file))?;
    writeln!(out, "{}", output::status(status))?;
    Ok(Status::Done)
}

/// Print `file:percent` for every requested file.
pub(crate) fn run_get_batch(
    db_path: &Path,
    out: &mut impl Write,
    dir: &str,
    files: &[String],
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let results = store.run(|conn| vlc_media_db::get_playback_batch(conn, dir, files))?;
    for (file, percent) in results {
        writeln!(out, "{}:{}", file, percent)?;
    }
    Ok(Status::Done)
}

/// Print `file:status` for every requested file.
pub(crate) fn run_get_batch_status(
    db_path: &Path,
    out: &mut impl Write,
    dir: &str,
    files: &[String],
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let results = store.run(|conn| vlc_media_db::get_playback_batch_status(conn, dir, files))?;
    for (file, status) in results {
        writeln!(out, "{}:{}", file, output::status(status))?;
    }
    Ok(Status::Done)
}

pub(crate) fn run_get_outro_triggered(
    db_path: &Path,
    out: &mut impl Write,
    file: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let triggered = store.run(|conn| vlc_media_db::get_outro_triggered(conn, file))?;
    writeln!(out, "{}", output::flag(triggered))?;
    Ok(Status::Done)
}

pub(crate) fn run_set_outro_triggered(
    db_path: &Path,
    out: &mut impl Write,
    file: &str,
    triggered: bool,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::set_outro_triggered(conn, file, triggered))?;
    ok(out)
}
