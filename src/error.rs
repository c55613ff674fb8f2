use thiserror::Error;

/// Why a shift's time-of-day text could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTimeError {
    #[error("empty time string")]
    Empty,

    #[error("malformed time string {0:?}, expected HH:MM or HHMM")]
    Malformed(String),

    #[error("time {text:?} out of range ({hours:02}:{minutes:02})")]
    OutOfRange {
        text: String,
        hours: u32,
        minutes: u32,
    },
}

/// Caller-facing errors: an invalid question, or a scenario that cannot be loaded.
#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("minute of day {0} outside 0..=1439")]
    InvalidMinuteOfDay(i64),

    #[error("hour index {0} outside 0..=23")]
    InvalidHour(i64),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoverageResult<T> = Result<T, CoverageError>;
