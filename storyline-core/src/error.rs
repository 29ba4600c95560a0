//! Error types for the storyline engine.

use thiserror::Error;

/// Errors that can occur while building a timeline.
///
/// Per-event problems (unparsable timing, unknown calendar ids) are not
/// errors: they surface as `None` and the event is dropped or rendered
/// numerically. Only conditions that make the whole run meaningless end up here.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Malformed calendar '{id}': {reason}")]
    MalformedCalendar { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for storyline operations.
pub type TimelineResult<T> = Result<T, TimelineError>;
