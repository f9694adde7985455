//! Error types for Circadia

use thiserror::Error;

/// Errors raised while validating inputs or generating a schedule.
///
/// Generation is pure and synchronous, so every failure is a validation
/// failure of some form; there is nothing transient to retry.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Malformed clock time (expected HH:MM): {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Missing required flight field: {0}")]
    MissingFlightField(&'static str),

    #[error("Layover at {airport} departs at or before its arrival")]
    InvalidLayover { airport: String },

    #[error("Sleep duration {minutes} min is outside the 420-540 min range")]
    InvalidSleepDuration { minutes: u32 },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Schedule generation failed: {0}")]
    Generation(String),
}
