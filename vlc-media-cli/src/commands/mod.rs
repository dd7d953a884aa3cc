pub(crate) mod playback;
pub(crate) mod series;

use std::io::Write;
use std::path::Path;

use vlc_media_db::MediaStore;

use crate::cli_types::Commands;
use crate::config;
use crate::error::CliError;

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Done,
    /// Nothing matched; the process exits 1 without printing anything.
    NotFound,
}

/// Open the store for one invocation, creating its directory if needed.
pub(crate) fn open_store(db_path: &Path) -> Result<MediaStore, CliError> {
    config::ensure_parent_dir(db_path)?;
    Ok(MediaStore::open(db_path)?)
}

/// Execute one command against the database at `db_path`.
pub(crate) fn run(command: Commands, db_path: &Path, out: &mut impl Write) -> Result<Status, CliError> {
    match command {
        Commands::Init => run_init(db_path, out),
        Commands::SavePlayback {
            file,
            position,
            duration,
            percent,
            prefix,
            suffix,
        } => playback::run_save_playback(
            db_path,
            out,
            playback::SaveArgs {
                file,
                position,
                duration,
                percent,
                prefix,
                suffix,
            },
        ),
        Commands::GetPlayback { file } => playback::run_get_playback(db_path, out, &file),
        Commands::GetPercent { file } => playback::run_get_percent(db_path, out, &file),
        Commands::GetStatus { file } => playback::run_get_status(db_path, out, &file),
        Commands::GetBatch { dir, files } => playback::run_get_batch(db_path, out, &dir, &files),
        Commands::GetBatchStatus { dir, files } => {
            playback::run_get_batch_status(db_path, out, &dir, &files)
        }
        Commands::GetOutroTriggered { file } => {
            playback::run_get_outro_triggered(db_path, out, &file)
        }
        Commands::SetOutroTriggered { file, triggered } => {
            playback::run_set_outro_triggered(db_path, out, &file, triggered)
        }
        Commands::SaveSettings {
            prefix,
            suffix,
            autoplay,
            skip_intro,
            skip_outro,
            intro_start,
            intro_end,
            credits_duration,
        } => series::run_save_settings(
            db_path,
            out,
            series::SettingsArgs {
                prefix,
                suffix,
                autoplay,
                skip_intro,
                skip_outro,
                intro_start,
                intro_end,
                credits_duration,
            },
        ),
        Commands::GetSettings { prefix, suffix } => {
            series::run_get_settings(db_path, out, &prefix, &suffix)
        }
        Commands::SettingsExist { prefix, suffix } => {
            series::run_settings_exist(db_path, out, &prefix, &suffix)
        }
        Commands::FindVersions { prefix, suffix } => {
            series::run_find_versions(db_path, out, &prefix, &suffix)
        }
        Commands::GetSkipMarkers { prefix, suffix } => {
            series::run_get_skip_markers(db_path, out, &prefix, &suffix)
        }
        Commands::SetIntro {
            prefix,
            suffix,
            start,
            end,
        } => series::run_set_intro(db_path, out, &prefix, &suffix, start, end),
        Commands::SetOutro {
            prefix,
            suffix,
            start,
        } => series::run_set_outro(db_path, out, &prefix, &suffix, start),
        Commands::GetOutro { prefix, suffix } => {
            series::run_get_outro(db_path, out, &prefix, &suffix)
        }
        Commands::ClearSkip {
            prefix,
            suffix,
            scope,
        } => series::run_clear_skip(db_path, out, &prefix, &suffix, &scope),
        Commands::GetCreditsDuration { prefix, suffix } => {
            series::run_get_credits_duration(db_path, out, &prefix, &suffix)
        }
        Commands::SetCreditsDuration {
            prefix,
            suffix,
            duration,
        } => series::run_set_credits_duration(db_path, out, &prefix, &suffix, duration),
    }
}

/// Create or migrate the database.
fn run_init(db_path: &Path, out: &mut impl Write) -> Result<Status, CliError> {
    let store = open_store(db_path)?;
    store.initialize()?;
    log::debug!("Initialized {}", db_path.display());
    writeln!(out, "OK")?;
    Ok(Status::Done)
}

/// Print `OK` after a successful mutation.
pub(crate) fn ok(out: &mut impl Write) -> Result<Status, CliError> {
    writeln!(out, "OK")?;
    Ok(Status::Done)
}
