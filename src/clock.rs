//! Clock-time arithmetic
//!
//! Pure functions over "HH:MM" clock strings. Everything operates in
//! minutes-since-midnight with explicit mod-1440 wraparound, so callers can
//! add, subtract, and diff times across midnight without tracking dates.

use crate::error::ValidationError;

/// Minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Parse an "HH:MM" clock time into minutes since midnight.
///
/// Fails fast on anything that is not a zero-padded 24-hour clock time.
pub fn time_to_minutes(time: &str) -> Result<i32, ValidationError> {
    let bad = || ValidationError::InvalidTimeFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(bad)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(bad());
    }

    let hours: i32 = hours.parse().map_err(|_| bad())?;
    let minutes: i32 = minutes.parse().map_err(|_| bad())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(bad());
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as an "HH:MM" clock time.
///
/// Negative and >1440 inputs are normalized into [0, 1440) first, so the
/// output of any wraparound arithmetic is always a valid clock time.
pub fn minutes_to_time(total_minutes: i32) -> String {
    let normalized = total_minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", normalized / 60, normalized % 60)
}

/// Add minutes to a clock time, wrapping past midnight.
pub fn add_minutes(time: &str, minutes: i32) -> Result<String, ValidationError> {
    Ok(minutes_to_time(time_to_minutes(time)? + minutes))
}

/// Subtract minutes from a clock time, wrapping past midnight.
pub fn subtract_minutes(time: &str, minutes: i32) -> Result<String, ValidationError> {
    add_minutes(time, -minutes)
}

/// Forward duration in minutes from `start` to `end`.
///
/// Always non-negative: if `end` reads earlier on the clock than `start`,
/// the span is taken to cross midnight and 24h is added. Callers rely on
/// this for duration calculations, never on signed differences.
pub fn time_difference(start: &str, end: &str) -> Result<i32, ValidationError> {
    let start_minutes = time_to_minutes(start)?;
    let mut end_minutes = time_to_minutes(end)?;
    if end_minutes < start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }
    Ok(end_minutes - start_minutes)
}

/// Whether `time` falls inside [start, end], treating end < start as a
/// range that crosses midnight.
pub fn is_in_range(time: &str, start: &str, end: &str) -> Result<bool, ValidationError> {
    let time_minutes = time_to_minutes(time)?;
    let start_minutes = time_to_minutes(start)?;
    let mut end_minutes = time_to_minutes(end)?;
    if end_minutes <= start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }

    let in_plain = time_minutes >= start_minutes && time_minutes <= end_minutes;
    let in_wrapped = time_minutes + MINUTES_PER_DAY >= start_minutes
        && time_minutes + MINUTES_PER_DAY <= end_minutes;
    Ok(in_plain || in_wrapped)
}

/// Round a clock time to the nearest half hour.
pub fn round_to_half_hour(time: &str) -> Result<String, ValidationError> {
    let minutes = time_to_minutes(time)?;
    let rounded = ((minutes as f64 / 30.0).round() as i32) * 30;
    Ok(minutes_to_time(rounded))
}
