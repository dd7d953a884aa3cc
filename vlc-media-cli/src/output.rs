//! Plain-text rendering for shell consumers.
//!
//! Every line is pipe- or colon-delimited; absent values render as empty
//! fields so scripts can split on the delimiter without special cases.

use vlc_media_db::{OtherVersion, PlaybackProgress, SeriesSettings, WatchStatus};

pub(crate) fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

pub(crate) fn status(value: Option<WatchStatus>) -> &'static str {
    value.map(|s| s.as_str()).unwrap_or("")
}

/// `position|duration|percent|prefix|suffix`
pub(crate) fn playback_line(p: &PlaybackProgress) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        optional(p.position),
        optional(p.duration),
        optional(p.percent),
        p.series_prefix,
        p.series_suffix
    )
}

/// `autoplay|skip_intro|skip_outro|intro_start|intro_end|credits_duration`
pub(crate) fn settings_line(s: &SeriesSettings) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        flag(s.autoplay),
        flag(s.skip_intro),
        flag(s.skip_outro),
        optional(s.intro_start),
        optional(s.intro_end),
        optional(s.credits_duration)
    )
}

/// `suffix|last_file|max_percent`
pub(crate) fn version_line(v: &OtherVersion) -> String {
    format!("{}|{}|{}", v.suffix, v.last_filename, v.max_percent)
}
