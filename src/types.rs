//! Core types for the Circadia engine
//!
//! This module defines the data structures that flow through each stage of
//! schedule generation: the traveler's habitual phase, the flight record,
//! typed activities, and the assembled activity schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::ValidationError;
use crate::timezone::TimezoneSpec;

/// Shift direction of the traveler's internal clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Phase advance: the clock must move earlier (eastward travel).
    Eastward,
    /// Phase delay: the clock must move later (westward travel).
    Westward,
}

impl Direction {
    /// Classify a timezone offset difference (destination minus origin).
    pub fn from_offset_hours(offset_hours: f64) -> Self {
        if offset_hours > 0.0 {
            Direction::Eastward
        } else {
            Direction::Westward
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Eastward => "eastward",
            Direction::Westward => "westward",
        }
    }
}

/// A habitual daily sleep phase: clock times only, no date, no timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircadianPhase {
    /// Habitual bedtime ("HH:MM")
    pub bed_time: String,
    /// Habitual wake time ("HH:MM")
    pub wake_time: String,
}

impl CircadianPhase {
    /// The neutral default phase used when no phase is supplied.
    pub fn neutral() -> Self {
        Self {
            bed_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
        }
    }

    /// Derived sleep duration in minutes (forward from bed to wake).
    pub fn sleep_duration(&self) -> Result<i32, ValidationError> {
        clock::time_difference(&self.bed_time, &self.wake_time)
    }

    /// Reject phases with malformed times or a sleep duration outside
    /// the 7-9 hour range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let duration = self.sleep_duration()?;
        if !(MIN_SLEEP_DURATION..=MAX_SLEEP_DURATION).contains(&duration) {
            return Err(ValidationError::InvalidSleepDuration {
                minutes: duration as u32,
            });
        }
        Ok(())
    }
}

impl Default for CircadianPhase {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Minimum healthy sleep duration (7 hours).
pub const MIN_SLEEP_DURATION: i32 = 420;
/// Maximum healthy sleep duration (9 hours).
pub const MAX_SLEEP_DURATION: i32 = 540;

/// One endpoint of a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    /// IATA airport code (e.g., "SFO")
    pub airport: String,
    /// Timezone of the airport
    pub timezone: TimezoneSpec,
}

/// An intermediate stop between flight segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layover {
    /// IATA airport code of the layover airport
    pub airport: String,
    /// When the traveler arrives at the layover airport
    pub arrival_time: DateTime<Utc>,
    /// When the traveler departs the layover airport
    pub departure_time: DateTime<Utc>,
    /// Layover duration in minutes
    pub duration_minutes: i64,
}

/// A validated flight record: the engine's primary input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub origin: FlightEndpoint,
    pub destination: FlightEndpoint,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Total journey duration in minutes, layovers included
    pub duration_minutes: i64,
    /// Ordered intermediate stops, if any
    #[serde(default)]
    pub layovers: Vec<Layover>,
}

impl Flight {
    /// Reject flights missing endpoints or with layovers that depart at or
    /// before their own arrival.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.origin.airport.is_empty() {
            return Err(ValidationError::MissingFlightField("origin"));
        }
        if self.destination.airport.is_empty() {
            return Err(ValidationError::MissingFlightField("destination"));
        }
        for layover in &self.layovers {
            if layover.departure_time <= layover.arrival_time {
                return Err(ValidationError::InvalidLayover {
                    airport: layover.airport.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A clock-time window; `end` earlier than `start` means it wraps past
/// midnight into the next day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Forward duration of the window in minutes.
    pub fn duration(&self) -> Result<i32, ValidationError> {
        clock::time_difference(&self.start, &self.end)
    }
}

/// Kind of recommended activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Sleep,
    BrightLight,
    AvoidLight,
    Supplement,
    Nap,
    Meal,
    Caffeine,
    Exercise,
}

impl ActivityType {
    /// Light-exposure activities carry a larger minimum viable duration in
    /// conflict resolution.
    pub fn is_light(&self) -> bool {
        matches!(self, ActivityType::BrightLight | ActivityType::AvoidLight)
    }
}

/// Ordered activity priority, used for conflict-resolution tie-breaking and
/// UI emphasis, never for exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Supplements the engine can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplementType {
    Melatonin,
}

/// A single recommended activity within one day.
///
/// Created fresh per schedule generation; immutable once emitted except for
/// resolver-driven start/end adjustment before the schedule is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub time_window: TimeWindow,
    pub priority: ActivityPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplement_type: Option<SupplementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The shifted sleep phase for one adaptation day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepTiming {
    pub bed_time: String,
    pub wake_time: String,
    /// Estimated days needed to fully adapt
    pub total_days: u32,
}

/// Light intensity recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightIntensity {
    Bright,
    Dim,
}

/// What the light exposure is meant to do to the internal clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightAction {
    Advance,
    Delay,
    Avoid,
}

/// The circadian model's light-timing output for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightExposureWindow {
    pub bright_light: TimeWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_light: Option<TimeWindow>,
    pub intensity: LightIntensity,
    #[serde(rename = "type")]
    pub action: LightAction,
    pub priority: ActivityPriority,
    /// Whether daylight (rather than a light box) can satisfy the window
    pub natural_light: bool,
    pub description: String,
}

/// One day of the adaptation period with its resolved activity set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationDay {
    pub day_index: u32,
    pub activities: Vec<Activity>,
}

/// The engine's sole output: the arrival day plus every adaptation day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySchedule {
    pub arrival_day_activities: Vec<Activity>,
    pub adaptation_days: Vec<AdaptationDay>,
}

/// Habitual tendency toward earlier or later sleep timing, on a 5-point
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChronotypeCategory {
    EarlyMorning,
    ModerateMorning,
    Neutral,
    ModerateEvening,
    LateEvening,
}

/// Self-reported sleep quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// The traveler's habitual sleep behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepProfile {
    pub typical_bed_time: String,
    pub typical_wake_time: String,
    pub sleep_quality: SleepQuality,
    /// Minutes to fall asleep
    pub sleep_latency: u32,
    pub can_nap: bool,
    pub consistent_schedule: bool,
}

/// Outcome of a previous jetlag episode, if the traveler reported one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorRecovery {
    pub days_to_recover: u32,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Optional personalization input. Read-only to the engine: never mutated,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub chronotype: ChronotypeCategory,
    pub sleep_profile: SleepProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_jetlag_recovery: Option<PriorRecovery>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_phase_duration_invariant() {
        let phase = CircadianPhase::neutral();
        assert_eq!(phase.sleep_duration().unwrap(), 480);
        assert!(phase.validate().is_ok());

        let short = CircadianPhase {
            bed_time: "02:00".to_string(),
            wake_time: "07:00".to_string(),
        };
        assert!(matches!(
            short.validate(),
            Err(ValidationError::InvalidSleepDuration { minutes: 300 })
        ));

        let long = CircadianPhase {
            bed_time: "21:00".to_string(),
            wake_time: "08:00".to_string(),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_phase_rejects_malformed_times() {
        let phase = CircadianPhase {
            bed_time: "23:00".to_string(),
            wake_time: "7am".to_string(),
        };
        assert!(matches!(
            phase.validate(),
            Err(ValidationError::InvalidTimeFormat(_))
        ));
    }

    #[test]
    fn test_flight_rejects_inverted_layover() {
        let arrival = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let flight = Flight {
            origin: FlightEndpoint {
                airport: "SFO".to_string(),
                timezone: TimezoneSpec::FixedOffset(-480),
            },
            destination: FlightEndpoint {
                airport: "LHR".to_string(),
                timezone: TimezoneSpec::FixedOffset(0),
            },
            departure_time: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap(),
            duration_minutes: 600,
            layovers: vec![Layover {
                airport: "JFK".to_string(),
                arrival_time: arrival,
                departure_time: arrival,
                duration_minutes: 0,
            }],
        };
        assert!(matches!(
            flight.validate(),
            Err(ValidationError::InvalidLayover { .. })
        ));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(ActivityPriority::Critical > ActivityPriority::High);
        assert!(ActivityPriority::High > ActivityPriority::Medium);
        assert!(ActivityPriority::Medium > ActivityPriority::Low);
    }

    #[test]
    fn test_wrapping_window_duration() {
        let window = TimeWindow::new("23:00", "07:00");
        assert_eq!(window.duration().unwrap(), 480);
    }
}
