//! Schedule assembly
//!
//! Drives the full pipeline for one flight: validate inputs, estimate
//! severity, then for the arrival day and each adaptation day run the
//! circadian model, apply personalization, materialize activities, and
//! resolve conflicts. Generation either fully succeeds or fully fails;
//! a partially built schedule is never returned.
//!
//! The timezone offset is threaded through every stage as a parameter, so
//! the engine holds no state and a single instance of nothing is needed;
//! concurrent callers just call the function.

use tracing::{debug, info};

use crate::builder;
use crate::circadian;
use crate::error::ValidationError;
use crate::personalize;
use crate::resolver;
use crate::severity::{self, JetlagSeverity};
use crate::timezone;
use crate::types::{
    Activity, ActivitySchedule, AdaptationDay, CircadianPhase, Direction, Flight, UserProfile,
};

/// Generate the full adaptation schedule for a flight.
///
/// `phase` defaults to the neutral 23:00/07:00 phase; `profile` is optional
/// and only adds adjustments. IANA timezones are resolved at the flight's
/// departure instant, so output is deterministic for a given flight record.
pub fn generate_activity_schedule(
    flight: &Flight,
    phase: Option<&CircadianPhase>,
    profile: Option<&UserProfile>,
) -> Result<ActivitySchedule, ValidationError> {
    flight.validate()?;
    let default_phase;
    let phase = match phase {
        Some(phase) => {
            phase.validate()?;
            phase
        }
        None => {
            default_phase = CircadianPhase::neutral();
            &default_phase
        }
    };

    let offset_hours = timezone::offset_difference_hours(
        &flight.origin.timezone,
        &flight.destination.timezone,
        flight.departure_time,
    )?;
    let severity = severity::estimate(flight, profile.map(|p| p.chronotype))?;
    info!(
        origin = %flight.origin.airport,
        destination = %flight.destination.airport,
        offset_hours,
        score = severity.score,
        days = severity.adaptation_days,
        "generating adaptation schedule"
    );

    assemble(offset_hours, phase, profile, &severity)
        .map_err(|e| ValidationError::Generation(e.to_string()))
}

fn assemble(
    offset_hours: f64,
    phase: &CircadianPhase,
    profile: Option<&UserProfile>,
    severity: &JetlagSeverity,
) -> Result<ActivitySchedule, ValidationError> {
    let arrival_day_activities = build_day(offset_hours, phase, profile, 0)?;

    let adaptation_days = (1..=severity.adaptation_days)
        .map(|day_index| {
            Ok(AdaptationDay {
                day_index,
                activities: build_day(offset_hours, phase, profile, day_index)?,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(ActivitySchedule {
        arrival_day_activities,
        adaptation_days,
    })
}

/// One day's resolved activities: circadian model, personalization,
/// builder, resolver, in that order.
fn build_day(
    offset_hours: f64,
    phase: &CircadianPhase,
    profile: Option<&UserProfile>,
    day_index: u32,
) -> Result<Vec<Activity>, ValidationError> {
    let direction = Direction::from_offset_hours(offset_hours);

    let mut sleep = circadian::sleep_timing(offset_hours, phase, day_index)?;
    // Light anchors to the original phase; only sleep drifts day to day.
    let mut light = circadian::light_timing(offset_hours, phase)?;

    if let Some(profile) = profile {
        sleep = personalize::adjust_sleep(&sleep, profile.chronotype)?;
        light = personalize::adjust_light(&light, profile.chronotype)?;
    }

    let mut activities = vec![builder::sleep_activity(&sleep)];
    activities.extend(builder::light_activities(&light));
    activities.push(builder::melatonin_activity(&sleep.bed_time, offset_hours)?);
    activities.push(builder::caffeine_cutoff_activity(&sleep.bed_time)?);
    activities.extend(builder::meal_activities(&sleep.wake_time, direction)?);
    if let Some(profile) = profile {
        activities.push(builder::exercise_activity(&sleep.wake_time)?);
        activities.extend(personalize::nap_activities(&sleep, profile)?);
    }

    let resolved = resolver::resolve(activities)?;
    debug!(day_index, count = resolved.len(), "resolved day activities");
    Ok(resolved)
}
