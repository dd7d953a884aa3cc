use std::io::Write;
use std::path::Path;

use vlc_media_db::{ClearScope, SeriesSettings};

use super::{ok, open_store, Status};
use crate::cli_types::parse_optional_seconds;
use crate::error::CliError;
use crate::output;

/// Raw `save_settings` arguments as parsed by clap.
pub(crate) struct SettingsArgs {
    pub prefix: String,
    pub suffix: String,
    pub autoplay: bool,
    pub skip_intro: bool,
    pub skip_outro: bool,
    pub intro_start: Option<String>,
    pub intro_end: Option<String>,
    pub credits_duration: Option<String>,
}

/// Save all settings for a series. Blank marker arguments store NULL.
pub(crate) fn run_save_settings(
    db_path: &Path,
    out: &mut impl Write,
    args: SettingsArgs,
) -> Result<Status, CliError> {
    let settings = SeriesSettings {
        intro_start: parse_optional_seconds("intro start", args.intro_start.as_deref())?,
        intro_end: parse_optional_seconds("intro end", args.intro_end.as_deref())?,
        credits_duration: parse_optional_seconds(
            "credits duration",
            args.credits_duration.as_deref(),
        )?,
        series_prefix: args.prefix,
        series_suffix: args.suffix,
        autoplay: args.autoplay,
        skip_intro: args.skip_intro,
        skip_outro: args.skip_outro,
    };
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::save_series_settings(conn, &settings))?;
    ok(out)
}

/// Print the six settings fields, or exit 1 if the series is unknown.
pub(crate) fn run_get_settings(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    match store.run(|conn| vlc_media_db::get_series_settings(conn, prefix, suffix))? {
        Some(settings) => {
            writeln!(out, "{}", output::settings_line(&settings))?;
            Ok(Status::Done)
        }
        None => Ok(Status::NotFound),
    }
}

pub(crate) fn run_settings_exist(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let exists = store.run(|conn| vlc_media_db::series_settings_exist(conn, prefix, suffix))?;
    writeln!(out, "{}", output::flag(exists))?;
    Ok(Status::Done)
}

/// Print one `suffix|last_file|max_percent` line per other version.
pub(crate) fn run_find_versions(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    let versions = store.run(|conn| vlc_media_db::find_other_versions(conn, prefix, suffix))?;
    for version in &versions {
        writeln!(out, "{}", output::version_line(version))?;
    }
    Ok(Status::Done)
}

/// Print skip markers as a JSON object.
pub(crate) fn run_get_skip_markers(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    match store.run(|conn| vlc_media_db::get_skip_markers(conn, prefix, suffix))? {
        Some(markers) => {
            writeln!(out, "{}", serde_json::to_string(&markers)?)?;
            Ok(Status::Done)
        }
        None => Ok(Status::NotFound),
    }
}

pub(crate) fn run_set_intro(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
    start: i64,
    end: i64,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::set_intro_markers(conn, prefix, suffix, start, end))?;
    ok(out)
}

pub(crate) fn run_set_outro(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
    start: i64,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::set_outro_marker(conn, prefix, suffix, start))?;
    ok(out)
}

pub(crate) fn run_get_outro(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    match store.run(|conn| vlc_media_db::get_outro_marker(conn, prefix, suffix))? {
        Some(start) => {
            writeln!(out, "{}", start)?;
            Ok(Status::Done)
        }
        None => Ok(Status::NotFound),
    }
}

/// Clear markers. The scope is checked before the database is opened.
pub(crate) fn run_clear_skip(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
    scope: &str,
) -> Result<Status, CliError> {
    let scope: ClearScope = scope.parse()?;
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::clear_skip_markers(conn, prefix, suffix, scope))?;
    ok(out)
}

pub(crate) fn run_get_credits_duration(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    match store.run(|conn| vlc_media_db::get_credits_duration(conn, prefix, suffix))? {
        Some(duration) => {
            writeln!(out, "{}", duration)?;
            Ok(Status::Done)
        }
        None => Ok(Status::NotFound),
    }
}

pub(crate) fn run_set_credits_duration(
    db_path: &Path,
    out: &mut impl Write,
    prefix: &str,
    suffix: &str,
    duration: i64,
) -> Result<Status, CliError> {
    let mut store = open_store(db_path)?;
    store.run(|conn| vlc_media_db::set_credits_duration(conn, prefix, suffix, duration))?;
    ok(out)
}
