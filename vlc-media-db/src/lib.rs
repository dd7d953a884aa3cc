//! SQLite persistence layer for playback progress and series skip settings.
//!
//! Provides schema creation with additive column migrations, playback and
//! series-settings operations, and a scoped store handle, backed by SQLite
//! (via rusqlite with bundled feature).

pub mod error;
pub mod playback;
pub mod schema;
pub mod series;
pub mod store;
pub mod types;

pub use error::OperationError;
pub use playback::{
    get_outro_triggered, get_playback, get_playback_batch, get_playback_batch_status,
    get_playback_percent, get_playback_status, save_playback, set_outro_triggered,
};
pub use schema::{initialize, open_database, open_memory, SchemaError};
pub use series::{
    clear_skip_markers, find_other_versions, get_credits_duration, get_outro_marker,
    get_series_settings, get_skip_markers, save_series_settings, series_settings_exist,
    set_credits_duration, set_intro_markers, set_outro_marker,
};
pub use store::MediaStore;
pub use types::{
    ClearScope, ClearScopeParseError, OtherVersion, PlaybackProgress, PlaybackUpdate,
    SeriesSettings, SkipMarkers, WatchStatus,
};
