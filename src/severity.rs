//! Jetlag severity estimation
//!
//! Scores a flight on a 0-10 scale from four impact factors:
//!
//! - timezone impact: |difference in hours| scaled by a direction factor
//!   (eastward travel is harder, and chronotype can worsen either direction)
//! - duration impact: journey length, saturating at 24 hours
//! - layover impact: short connections disrupt most, mid-length ones
//!   moderately, long ones only mildly
//! - time-of-day impact: overnight arrivals and very early or very late
//!   departures
//!
//! The adaptation-day estimate assumes a nominal 1 hour of clock shift per
//! day.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::timezone;
use crate::types::{ChronotypeCategory, Direction, Flight};

/// Breakdown of the factors behind a severity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityFactors {
    /// Absolute timezone difference in hours
    pub timezone_difference: f64,
    pub flight_duration: f64,
    pub layover_impact: f64,
    pub directionality: Direction,
    pub time_of_day_impact: f64,
}

/// Severity estimate for one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JetlagSeverity {
    /// 0-10, one decimal place
    pub score: f64,
    /// Signed timezone difference in hours, destination minus origin
    pub timezone_difference: f64,
    pub factors: SeverityFactors,
    /// Estimated days to fully adapt
    pub adaptation_days: u32,
}

/// Estimate jetlag severity for a flight.
///
/// IANA timezones are resolved at the flight's departure instant, so the
/// estimate is deterministic for a given flight record.
pub fn estimate(
    flight: &Flight,
    chronotype: Option<ChronotypeCategory>,
) -> Result<JetlagSeverity, ValidationError> {
    let timezone_diff = timezone::offset_difference_hours(
        &flight.origin.timezone,
        &flight.destination.timezone,
        flight.departure_time,
    )?;
    let direction = Direction::from_offset_hours(timezone_diff);

    let timezone_impact = timezone_diff.abs() * direction_factor(direction, chronotype);
    let duration_impact = duration_impact(flight.duration_minutes);
    let layover_impact = layover_impact(&flight.layovers);
    let time_of_day_impact = time_of_day_impact(flight)?;

    let base_score = ((timezone_impact + duration_impact + layover_impact + time_of_day_impact)
        / 3.0)
        .min(10.0);
    let score = (base_score * 10.0).round() / 10.0;

    let adaptation_days = timezone_diff.abs().ceil() as u32;
    debug!(
        score,
        timezone_diff, adaptation_days, "estimated jetlag severity"
    );

    Ok(JetlagSeverity {
        score,
        timezone_difference: timezone_diff,
        factors: SeverityFactors {
            timezone_difference: timezone_diff.abs(),
            flight_duration: duration_impact,
            layover_impact,
            directionality: direction,
            time_of_day_impact,
        },
        adaptation_days,
    })
}

/// Eastward phase advances are harder than westward delays. Late
/// chronotypes struggle more eastward, early ones more westward.
fn direction_factor(direction: Direction, chronotype: Option<ChronotypeCategory>) -> f64 {
    let mut factor = match direction {
        Direction::Eastward => 1.2,
        Direction::Westward => 1.0,
    };
    if let Some(chronotype) = chronotype {
        let late = matches!(
            chronotype,
            ChronotypeCategory::ModerateEvening | ChronotypeCategory::LateEvening
        );
        let early = matches!(
            chronotype,
            ChronotypeCategory::EarlyMorning | ChronotypeCategory::ModerateMorning
        );
        if direction == Direction::Eastward && late {
            factor *= 1.2;
        } else if direction == Direction::Westward && early {
            factor *= 1.1;
        }
    }
    factor
}

fn duration_impact(duration_minutes: i64) -> f64 {
    let hours = duration_minutes as f64 / 60.0;
    (hours / 24.0).min(1.0) * 2.0
}

fn layover_impact(layovers: &[crate::types::Layover]) -> f64 {
    layovers
        .iter()
        .map(|layover| {
            let hours = layover.duration_minutes as f64 / 60.0;
            if hours < 3.0 {
                // Short connections leave no room to rest.
                (hours / 3.0) * 0.8
            } else if hours > 6.0 {
                // Long stops allow partial adaptation on the ground.
                ((hours - 6.0) / 6.0).min(1.0) * 0.3
            } else {
                (hours / 3.0).min(1.0) * 0.5
            }
        })
        .sum()
}

fn time_of_day_impact(flight: &Flight) -> Result<f64, ValidationError> {
    let arrival_hour =
        timezone::local_hour(&flight.destination.timezone, flight.arrival_time)?;
    let departure_hour = timezone::local_hour(&flight.origin.timezone, flight.departure_time)?;

    let mut impact = 0.0;
    // Arriving during normal sleep hours.
    if arrival_hour >= 22 || arrival_hour <= 6 {
        impact += 0.5;
    }
    // Departing at an extreme hour.
    if departure_hour <= 4 || departure_hour >= 23 {
        impact += 0.5;
    } else if departure_hour <= 6 || departure_hour >= 21 {
        impact += 0.3;
    }
    Ok(impact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::TimezoneSpec;
    use crate::types::{FlightEndpoint, Layover};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn make_flight(
        origin_offset: i32,
        destination_offset: i32,
        departure_hour_utc: u32,
        duration_minutes: i64,
    ) -> Flight {
        let departure = Utc
            .with_ymd_and_hms(2024, 1, 15, departure_hour_utc, 0, 0)
            .unwrap();
        Flight {
            origin: FlightEndpoint {
                airport: "AAA".to_string(),
                timezone: TimezoneSpec::FixedOffset(origin_offset),
            },
            destination: FlightEndpoint {
                airport: "BBB".to_string(),
                timezone: TimezoneSpec::FixedOffset(destination_offset),
            },
            departure_time: departure,
            arrival_time: departure + chrono::Duration::minutes(duration_minutes),
            duration_minutes,
            layovers: Vec::new(),
        }
    }

    #[test]
    fn test_eastward_scores_higher_than_westward() {
        // SFO -> LHR vs LHR -> SFO, same geometry, opposite directions.
        let eastward = make_flight(-480, 0, 16, 630);
        let westward = make_flight(0, -480, 16, 630);
        let east = estimate(&eastward, None).unwrap();
        let west = estimate(&westward, None).unwrap();
        assert!(east.score > west.score, "{} vs {}", east.score, west.score);
        assert_eq!(east.factors.directionality, Direction::Eastward);
        assert_eq!(west.factors.directionality, Direction::Westward);
    }

    #[test]
    fn test_adaptation_days_equal_ceiling_of_offset() {
        let flight = make_flight(-480, 0, 16, 630);
        assert_eq!(estimate(&flight, None).unwrap().adaptation_days, 8);

        let fractional = make_flight(0, 330, 10, 540);
        assert_eq!(estimate(&fractional, None).unwrap().adaptation_days, 6);
    }

    #[test]
    fn test_late_chronotype_penalized_eastward() {
        let flight = make_flight(-480, 0, 16, 630);
        let neutral = estimate(&flight, Some(ChronotypeCategory::Neutral)).unwrap();
        let late = estimate(&flight, Some(ChronotypeCategory::LateEvening)).unwrap();
        assert!(late.score > neutral.score);

        // Early chronotypes are unaffected eastward.
        let early = estimate(&flight, Some(ChronotypeCategory::EarlyMorning)).unwrap();
        assert_eq!(early.score, neutral.score);
    }

    #[test]
    fn test_early_chronotype_penalized_westward() {
        let flight = make_flight(0, -480, 16, 630);
        let neutral = estimate(&flight, Some(ChronotypeCategory::Neutral)).unwrap();
        let early = estimate(&flight, Some(ChronotypeCategory::ModerateMorning)).unwrap();
        assert!(early.score > neutral.score);
    }

    #[test]
    fn test_duration_impact_saturates_at_twenty_four_hours() {
        assert_eq!(duration_impact(12 * 60), 1.0);
        assert_eq!(duration_impact(24 * 60), 2.0);
        assert_eq!(duration_impact(36 * 60), 2.0);
    }

    #[test]
    fn test_layover_impact_by_length() {
        let make_layover = |minutes: i64| Layover {
            airport: "XXX".to_string(),
            arrival_time: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            departure_time: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
                + chrono::Duration::minutes(minutes),
            duration_minutes: minutes,
        };
        // 90 min connection: (1.5/3)*0.8 = 0.4
        assert_eq!(layover_impact(&[make_layover(90)]), 0.4);
        // 4h30 layover: (4.5/3 capped at 1)*0.5 = 0.5
        assert_eq!(layover_impact(&[make_layover(270)]), 0.5);
        // 9h layover: ((9-6)/6)*0.3 = 0.15
        assert_eq!(layover_impact(&[make_layover(540)]), 0.15);
        // Impacts sum across layovers.
        assert_eq!(layover_impact(&[make_layover(90), make_layover(540)]), 0.55);
    }

    #[test]
    fn test_overnight_arrival_adds_time_of_day_impact() {
        // Departs 10:00 local, arrives 23:00 local.
        let day_flight = make_flight(0, 0, 10, 13 * 60);
        let severity = estimate(&day_flight, None).unwrap();
        assert_eq!(severity.factors.time_of_day_impact, 0.5);
    }

    #[test]
    fn test_extreme_departure_hour_adds_impact() {
        // Departs 03:00 local, arrives 11:00 local.
        let red_eye = make_flight(0, 0, 3, 8 * 60);
        let severity = estimate(&red_eye, None).unwrap();
        // 03:00 departure (+0.5) and 11:00 arrival (0).
        assert_eq!(severity.factors.time_of_day_impact, 0.5);
    }

    #[test]
    fn test_score_is_capped_and_rounded() {
        let mut flight = make_flight(-720, 660, 12, 20 * 60);
        flight.layovers.push(Layover {
            airport: "XXX".to_string(),
            arrival_time: flight.departure_time + chrono::Duration::hours(5),
            departure_time: flight.departure_time + chrono::Duration::hours(6),
            duration_minutes: 60,
        });
        let severity = estimate(&flight, Some(ChronotypeCategory::LateEvening)).unwrap();
        assert!(severity.score <= 10.0);
        assert_eq!(severity.score, (severity.score * 10.0).round() / 10.0);
    }
}
