//! Data model types for playback progress and series settings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ── Watch Status ────────────────────────────────────────────────────────────

/// Percent at or above which a file counts as watched.
pub const WATCHED_THRESHOLD: i64 = 90;

/// Derived watch status of a playback record.
///
/// A record with 0% progress has no status at all, so the "absent" state is
/// represented as `Option::None` rather than a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchStatus {
    Partial,
    Watched,
}

impl WatchStatus {
    /// Status for a given percent: `>= 90` watched, `>= 1` partial, otherwise none.
    pub fn from_percent(percent: i64) -> Option<Self> {
        if percent >= WATCHED_THRESHOLD {
            Some(Self::Watched)
        } else if percent >= 1 {
            Some(Self::Partial)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Watched => "watched",
        }
    }

    /// Parse a stored status column. Unknown text reads as no status.
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "partial" => Some(Self::Partial),
            "watched" => Some(Self::Watched),
            _ => None,
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Playback ────────────────────────────────────────────────────────────────

/// Input for [`crate::save_playback`]. Status is derived, never supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackUpdate {
    pub filename: String,
    pub position: i64,
    pub duration: i64,
    pub percent: i64,
    pub series_prefix: Option<String>,
    pub series_suffix: Option<String>,
}

impl PlaybackUpdate {
    pub fn status(&self) -> Option<WatchStatus> {
        WatchStatus::from_percent(self.percent)
    }
}

/// Stored progress for one file, as returned by [`crate::get_playback`].
///
/// Numeric fields are optional because a bare row created by
/// [`crate::set_outro_triggered`] has no progress yet. Missing series keys
/// come back as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackProgress {
    pub position: Option<i64>,
    pub duration: Option<i64>,
    pub percent: Option<i64>,
    pub series_prefix: String,
    pub series_suffix: String,
}

/// Another suffix watched under the same series prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherVersion {
    pub suffix: String,
    /// Most recently inserted file for this suffix.
    pub last_filename: String,
    pub max_percent: i64,
}

// ── Series Settings ─────────────────────────────────────────────────────────

/// Per-series playback configuration, keyed by `(series_prefix, series_suffix)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSettings {
    pub series_prefix: String,
    pub series_suffix: String,
    pub autoplay: bool,
    pub skip_intro: bool,
    pub skip_outro: bool,
    pub intro_start: Option<i64>,
    pub intro_end: Option<i64>,
    pub credits_duration: Option<i64>,
}

/// Skip-marker subset of a series row, serialized as JSON for the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipMarkers {
    pub intro_start: Option<i64>,
    pub intro_end: Option<i64>,
    pub credits_duration: Option<i64>,
}

/// Which markers [`crate::clear_skip_markers`] resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClearScope {
    /// `intro_start` and `intro_end`.
    Intro,
    /// The legacy `outro_start` column only.
    Outro,
    #[default]
    All,
}

impl ClearScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Outro => "outro",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ClearScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown clear scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marker type '{0}' (expected intro, outro or all)")]
pub struct ClearScopeParseError(pub String);

impl FromStr for ClearScope {
    type Err = ClearScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intro" => Ok(Self::Intro),
            "outro" => Ok(Self::Outro),
            "all" => Ok(Self::All),
            _ => Err(ClearScopeParseError(s.to_string())),
        }
    }
}
