//! Circadian model
//!
//! Light and sleep timing rules anchored on the estimated core body
//! temperature nadir (CBT-min):
//!
//! - CBT-min is estimated at 2 hours before habitual wake time.
//! - Eastward travel (phase advance): bright light starts 3 hours after
//!   CBT-min. Westward (phase delay): bright light ends 2 hours before
//!   CBT-min. Both windows last 2 hours.
//! - The avoid-light window sits nominally 12 hours opposite the bright
//!   window, re-anchored to the 2 hours before wake when the naive placement
//!   lands near wake, when either window collides with sleep, or past the
//!   date line.
//! - Sleep shifts day by day (eastward 60 min earlier, westward 90 min
//!   later) while light windows stay anchored to the original phase, so
//!   exposure keeps targeting the pre-travel CBT-min until sleep catches up.

use crate::clock;
use crate::error::ValidationError;
use crate::types::{
    ActivityPriority, CircadianPhase, Direction, LightAction, LightExposureWindow,
    LightIntensity, SleepTiming, TimeWindow, MAX_SLEEP_DURATION, MIN_SLEEP_DURATION,
};

/// Minutes before wake time at which CBT-min is estimated.
const NADIR_BEFORE_WAKE: i32 = 120;

/// Duration of bright and avoid light windows.
const LIGHT_WINDOW_DURATION: i32 = 120;

/// Bright light starts this long after CBT-min when advancing.
const ADVANCE_AFTER_NADIR: i32 = 180;

/// Bright light ends this long before CBT-min when delaying.
const DELAY_BEFORE_NADIR: i32 = 120;

/// Naive avoid-light placements closer to wake than this get re-anchored.
const AVOID_NEAR_WAKE: i32 = 180;

/// Eastward bed-time advance per adaptation day, in minutes.
const EASTWARD_SHIFT_PER_DAY: i32 = 60;

/// Westward bed-time delay per adaptation day, in minutes.
const WESTWARD_SHIFT_PER_DAY: i32 = 90;

/// Per-day shift cap for date-line crossings, either direction.
const DATE_LINE_SHIFT_PER_DAY: i32 = 60;

/// Estimated core body temperature nadir: 2 hours before wake.
pub fn nadir(phase: &CircadianPhase) -> Result<String, ValidationError> {
    clock::subtract_minutes(&phase.wake_time, NADIR_BEFORE_WAKE)
}

/// Light exposure windows for one day of adaptation.
///
/// Computed from the traveler's original phase regardless of day index;
/// only sleep drifts across the adaptation period.
pub fn light_timing(
    offset_hours: f64,
    phase: &CircadianPhase,
) -> Result<LightExposureWindow, ValidationError> {
    let direction = Direction::from_offset_hours(offset_hours);
    let nadir_minutes = clock::time_to_minutes(&nadir(phase)?)?;

    let bright_start = match direction {
        Direction::Eastward => nadir_minutes + ADVANCE_AFTER_NADIR,
        Direction::Westward => nadir_minutes - DELAY_BEFORE_NADIR - LIGHT_WINDOW_DURATION,
    };
    let bright = TimeWindow::new(
        clock::minutes_to_time(bright_start),
        clock::minutes_to_time(bright_start + LIGHT_WINDOW_DURATION),
    );

    // Naive placement: 12 hours opposite the bright window.
    let avoid_start = bright_start + 12 * 60;
    let naive_avoid = TimeWindow::new(
        clock::minutes_to_time(avoid_start),
        clock::minutes_to_time(avoid_start + LIGHT_WINDOW_DURATION),
    );

    let sleep = TimeWindow::new(phase.bed_time.clone(), phase.wake_time.clone());
    let avoid = if near_wake(&naive_avoid, &phase.wake_time)?
        || windows_overlap(&naive_avoid, &sleep)?
        || windows_overlap(&bright, &sleep)?
        || offset_hours.abs() > 12.0
    {
        TimeWindow::new(
            clock::subtract_minutes(&phase.wake_time, LIGHT_WINDOW_DURATION)?,
            phase.wake_time.clone(),
        )
    } else {
        naive_avoid
    };

    let action = match direction {
        Direction::Eastward => LightAction::Advance,
        Direction::Westward => LightAction::Delay,
    };
    let description = match direction {
        Direction::Eastward => "Seek bright light to advance your body clock",
        Direction::Westward => "Seek bright light to delay your body clock",
    };

    Ok(LightExposureWindow {
        natural_light: is_daytime(&bright)?,
        bright_light: bright,
        avoid_light: Some(avoid),
        intensity: LightIntensity::Bright,
        action,
        priority: ActivityPriority::Critical,
        description: description.to_string(),
    })
}

/// Shifted sleep phase for the given adaptation day.
///
/// Day 0 is the unshifted original phase; each later day moves bed time by
/// the per-day shift, with wake derived from the clamped original duration.
pub fn sleep_timing(
    offset_hours: f64,
    phase: &CircadianPhase,
    day_index: u32,
) -> Result<SleepTiming, ValidationError> {
    let shift_per_day = per_day_shift(offset_hours);
    let cumulative = shift_per_day * day_index as i32;

    let bed_time = clock::add_minutes(&phase.bed_time, cumulative)?;
    let duration = phase
        .sleep_duration()?
        .clamp(MIN_SLEEP_DURATION, MAX_SLEEP_DURATION);
    let wake_time = clock::add_minutes(&bed_time, duration)?;

    Ok(SleepTiming {
        bed_time,
        wake_time,
        total_days: total_adaptation_days(offset_hours),
    })
}

/// Signed per-day bed-time shift in minutes: negative advances, positive
/// delays. Date-line crossings are capped at 60 min either way.
pub fn per_day_shift(offset_hours: f64) -> i32 {
    let direction = Direction::from_offset_hours(offset_hours);
    if offset_hours.abs() > 12.0 {
        return match direction {
            Direction::Eastward => -DATE_LINE_SHIFT_PER_DAY,
            Direction::Westward => DATE_LINE_SHIFT_PER_DAY,
        };
    }
    match direction {
        Direction::Eastward => -EASTWARD_SHIFT_PER_DAY,
        Direction::Westward => WESTWARD_SHIFT_PER_DAY,
    }
}

/// Days needed to adapt, at the nominal 1 hour of shift per day.
pub fn total_adaptation_days(offset_hours: f64) -> u32 {
    offset_hours.abs().ceil() as u32
}

/// Whether either edge of `window` lies within 3 hours of `wake`, or `wake`
/// falls inside the window.
fn near_wake(window: &TimeWindow, wake: &str) -> Result<bool, ValidationError> {
    let wake_minutes = clock::time_to_minutes(wake)?;
    let edge_near = |edge: &str| -> Result<bool, ValidationError> {
        let edge_minutes = clock::time_to_minutes(edge)?;
        let forward = (edge_minutes - wake_minutes).rem_euclid(clock::MINUTES_PER_DAY);
        let circular = forward.min(clock::MINUTES_PER_DAY - forward);
        Ok(circular <= AVOID_NEAR_WAKE)
    };
    Ok(edge_near(&window.start)?
        || edge_near(&window.end)?
        || clock::is_in_range(wake, &window.start, &window.end)?)
}

/// Overlap test that treats end < start as wrapping past midnight.
fn windows_overlap(a: &TimeWindow, b: &TimeWindow) -> Result<bool, ValidationError> {
    let segments = |window: &TimeWindow| -> Result<Vec<(i32, i32)>, ValidationError> {
        let start = clock::time_to_minutes(&window.start)?;
        let end = clock::time_to_minutes(&window.end)?;
        if end <= start {
            Ok(vec![(start, clock::MINUTES_PER_DAY), (0, end)])
        } else {
            Ok(vec![(start, end)])
        }
    };
    for (a_start, a_end) in segments(a)? {
        for (b_start, b_end) in segments(b)? {
            if a_start < b_end && b_start < a_end {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Rough daytime test for whether sunlight can satisfy a bright window.
fn is_daytime(window: &TimeWindow) -> Result<bool, ValidationError> {
    let start = clock::time_to_minutes(&window.start)?;
    Ok((7 * 60..17 * 60).contains(&start))
}
