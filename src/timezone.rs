//! Timezone resolution
//!
//! A `TimezoneSpec` is either a fixed UTC offset in minutes or an IANA zone
//! name. Fixed offsets resolve to themselves; IANA names resolve through
//! `chrono-tz` at a caller-supplied instant, so DST is honored and callers
//! that need determinism pin the instant (or use fixed offsets).

use chrono::{DateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A timezone given either as a fixed offset or an IANA name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TimezoneSpec {
    /// Fixed UTC offset in minutes (east positive), e.g. 330 for +05:30.
    FixedOffset(i32),
    /// IANA zone name, e.g. "America/Los_Angeles".
    Iana(String),
}

impl TimezoneSpec {
    /// Parse an offset string of the form `+HH:MM` or `-HH:MM`.
    pub fn parse_offset(text: &str) -> Result<Self, ValidationError> {
        let bad = || ValidationError::InvalidTimezone(text.to_string());

        let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = text.strip_prefix('-') {
            (-1, rest)
        } else {
            return Err(bad());
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(bad)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(bad());
        }
        let hours: i32 = hours.parse().map_err(|_| bad())?;
        let minutes: i32 = minutes.parse().map_err(|_| bad())?;
        if hours > 18 || !(0..60).contains(&minutes) {
            return Err(bad());
        }

        Ok(TimezoneSpec::FixedOffset(sign * (hours * 60 + minutes)))
    }

    /// Resolve to a UTC offset in minutes at the given instant.
    pub fn offset_minutes(&self, at: DateTime<Utc>) -> Result<i32, ValidationError> {
        match self {
            TimezoneSpec::FixedOffset(minutes) => Ok(*minutes),
            TimezoneSpec::Iana(name) => {
                let zone: chrono_tz::Tz = name
                    .parse()
                    .map_err(|_| ValidationError::InvalidTimezone(name.clone()))?;
                let offset = zone.offset_from_utc_datetime(&at.naive_utc());
                Ok(offset.fix().local_minus_utc() / 60)
            }
        }
    }
}

/// Timezone difference in hours, destination minus origin, both resolved at
/// the same instant. Fractional offsets (e.g. +05:30) stay fractional.
pub fn offset_difference_hours(
    origin: &TimezoneSpec,
    destination: &TimezoneSpec,
    at: DateTime<Utc>,
) -> Result<f64, ValidationError> {
    let origin_minutes = origin.offset_minutes(at)?;
    let destination_minutes = destination.offset_minutes(at)?;
    Ok(f64::from(destination_minutes - origin_minutes) / 60.0)
}

/// Local clock hour (0-23) of an instant in the given timezone.
pub fn local_hour(
    timezone: &TimezoneSpec,
    at: DateTime<Utc>,
) -> Result<u32, ValidationError> {
    let offset_minutes = timezone.offset_minutes(at)?;
    let local = at + chrono::Duration::minutes(i64::from(offset_minutes));
    Ok(chrono::Timelike::hour(&local))
}
