//! CLI type definitions: the command enum and argument helpers.
//!
//! Command names keep the mixed `snake_case` / `kebab-case` spelling the
//! player scripts already call.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "vlc-media", version)]
#[command(about = "Playback progress and skip markers for VLC helper scripts", long_about = None)]
pub(crate) struct Cli {
    /// Database file (default: settings.toml, then vlc_media.db next to the executable)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the tables and apply column migrations
    #[command(name = "init")]
    Init,

    /// Save playback progress for a file
    #[command(name = "save_playback", allow_negative_numbers = true)]
    SavePlayback {
        #[arg(allow_hyphen_values = true)]
        file: String,
        position: i64,
        duration: i64,
        percent: i64,
        /// Series prefix (empty string for none)
        prefix: Option<String>,
        /// Series suffix (empty string for none)
        suffix: Option<String>,
    },

    /// Print position|duration|percent|prefix|suffix
    #[command(name = "get_playback")]
    GetPlayback {
        #[arg(allow_hyphen_values = true)]
        file: String,
    },

    /// Print watched percent (0 when unknown)
    #[command(name = "get_percent")]
    GetPercent {
        #[arg(allow_hyphen_values = true)]
        file: String,
    },

    /// Print watch status (watched, partial or empty)
    #[command(name = "get_status")]
    GetStatus {
        #[arg(allow_hyphen_values = true)]
        file: String,
    },

    /// Print file:percent for each file in a directory
    #[command(name = "get_batch")]
    GetBatch {
        dir: String,
        #[arg(required = true, allow_hyphen_values = true)]
        files: Vec<String>,
    },

    /// Print file:status for each file
    #[command(name = "get_batch_status")]
    GetBatchStatus {
        dir: String,
        #[arg(required = true, allow_hyphen_values = true)]
        files: Vec<String>,
    },

    /// Save all settings for a series
    #[command(name = "save_settings", allow_negative_numbers = true)]
    SaveSettings {
        prefix: String,
        suffix: String,
        #[arg(action = ArgAction::Set, value_parser = parse_flag)]
        autoplay: bool,
        #[arg(action = ArgAction::Set, value_parser = parse_flag)]
        skip_intro: bool,
        #[arg(action = ArgAction::Set, value_parser = parse_flag)]
        skip_outro: bool,
        /// Intro start in seconds (empty string for none)
        intro_start: Option<String>,
        /// Intro end in seconds (empty string for none)
        intro_end: Option<String>,
        /// Credits duration in seconds (empty string for none)
        credits_duration: Option<String>,
    },

    /// Print autoplay|skip_intro|skip_outro|intro_start|intro_end|credits_duration
    #[command(name = "get_settings")]
    GetSettings { prefix: String, suffix: String },

    /// Print 1 if settings exist for a series, 0 otherwise
    #[command(name = "settings_exist")]
    SettingsExist { prefix: String, suffix: String },

    /// Print suffix|last_file|max_percent for other versions of a series
    #[command(name = "find_versions")]
    FindVersions { prefix: String, suffix: String },

    /// Print skip markers as JSON
    #[command(name = "get-skip-markers")]
    GetSkipMarkers { prefix: String, suffix: String },

    /// Set intro start and end markers
    #[command(name = "set-intro", allow_negative_numbers = true)]
    SetIntro {
        prefix: String,
        suffix: String,
        start: i64,
        end: i64,
    },

    /// Set the outro start marker
    #[command(name = "set-outro", allow_negative_numbers = true)]
    SetOutro {
        prefix: String,
        suffix: String,
        start: i64,
    },

    /// Print the outro start marker
    #[command(name = "get-outro")]
    GetOutro { prefix: String, suffix: String },

    /// Clear markers (intro, outro or all)
    #[command(name = "clear-skip")]
    ClearSkip {
        prefix: String,
        suffix: String,
        #[arg(default_value = "all")]
        scope: String,
    },

    /// Print 1 if the outro action already fired for a file, 0 otherwise
    #[command(name = "get-outro-triggered")]
    GetOutroTriggered {
        #[arg(allow_hyphen_values = true)]
        file: String,
    },

    /// Set the outro-triggered flag (0 or 1)
    #[command(name = "set-outro-triggered")]
    SetOutroTriggered {
        #[arg(allow_hyphen_values = true)]
        file: String,
        #[arg(action = ArgAction::Set, value_parser = parse_flag)]
        triggered: bool,
    },

    /// Print the credits duration in seconds
    #[command(name = "get-credits-duration")]
    GetCreditsDuration { prefix: String, suffix: String },

    /// Set the credits duration in seconds
    #[command(name = "set-credits-duration", allow_negative_numbers = true)]
    SetCreditsDuration {
        prefix: String,
        suffix: String,
        duration: i64,
    },
}

impl Commands {
    /// Commands that answer with `OK` / `ERROR` on stdout.
    pub(crate) fn reports_status(&self) -> bool {
        matches!(
            self,
            Self::Init
                | Self::SavePlayback { .. }
                | Self::SaveSettings { .. }
                | Self::SetIntro { .. }
                | Self::SetOutro { .. }
                | Self::ClearSkip { .. }
                | Self::SetOutroTriggered { .. }
                | Self::SetCreditsDuration { .. }
        )
    }
}

/// Parse a 0/1 flag. `true` and `false` are accepted too.
pub(crate) fn parse_flag(s: &str) -> Result<bool, String> {
    match s {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(format!("expected 0 or 1, got '{}'", s)),
    }
}

/// Treat a missing or empty positional as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse an optional seconds value where an empty string means "unset".
pub(crate) fn parse_optional_seconds(
    name: &'static str,
    value: Option<&str>,
) -> Result<Option<i64>, CliError> {
    match value {
        None | Some("") => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CliError::invalid_argument(name, format!("'{}' is not a number", v))),
    }
}
