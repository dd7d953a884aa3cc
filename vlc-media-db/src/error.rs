use thiserror::Error;

/// Errors returned by playback and series-settings operations.
///
/// Validation variants are produced before any statement runs, so a failed
/// validation never leaves a partial write behind.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: i64 },
    #[error("intro end ({end}) must be greater than intro start ({start})")]
    InvalidIntroRange { start: i64, end: i64 },
}

impl OperationError {
    /// True for errors raised by argument checks rather than by SQLite.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Sqlite(_))
    }
}

/// Reject a negative seconds value.
pub(crate) fn ensure_non_negative(field: &'static str, value: i64) -> Result<(), OperationError> {
    if value < 0 {
        return Err(OperationError::NegativeValue { field, value });
    }
    Ok(())
}

/// Check an intro range: both ends non-negative and `end > start`.
pub(crate) fn ensure_intro_range(start: i64, end: i64) -> Result<(), OperationError> {
    ensure_non_negative("intro start", start)?;
    ensure_non_negative("intro end", end)?;
    if end <= start {
        return Err(OperationError::InvalidIntroRange { start, end });
    }
    Ok(())
}
