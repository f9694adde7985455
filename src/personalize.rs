//! Personalization layer
//!
//! Optional adjustments applied only when a `UserProfile` is supplied:
//!
//! - light windows shift by chronotype (morning types earlier, evening
//!   types later)
//! - the sleep window shifts by chronotype, with a floor keeping late
//!   evening types from being scheduled to bed before 22:00
//! - a personalized recovery-day estimate from age, sleep quality, and any
//!   prior jetlag history
//! - optional naps placed around the waking-period midpoint, gated on the
//!   traveler's ability to nap
//!
//! The profile is read-only; every adjustment returns a new value.

use crate::builder;
use crate::clock;
use crate::error::ValidationError;
use crate::types::{
    Activity, ChronotypeCategory, LightExposureWindow, SleepQuality, SleepTiming, TimeWindow,
    UserProfile,
};

/// Late evening types are never scheduled to bed before this.
const LATE_EVENING_BED_FLOOR: i32 = 22 * 60;

/// Light-window shift in minutes for a chronotype. Morning types tolerate
/// earlier light, evening types need it later.
pub fn light_shift_minutes(chronotype: ChronotypeCategory) -> i32 {
    match chronotype {
        ChronotypeCategory::EarlyMorning => -60,
        ChronotypeCategory::ModerateMorning => -30,
        ChronotypeCategory::Neutral => 0,
        ChronotypeCategory::ModerateEvening => 30,
        ChronotypeCategory::LateEvening => 60,
    }
}

/// Sleep-window shift in minutes for a chronotype.
pub fn sleep_shift_minutes(chronotype: ChronotypeCategory) -> i32 {
    match chronotype {
        ChronotypeCategory::EarlyMorning => -120,
        ChronotypeCategory::ModerateMorning => -60,
        ChronotypeCategory::Neutral => 0,
        ChronotypeCategory::ModerateEvening => 60,
        ChronotypeCategory::LateEvening => 120,
    }
}

fn shift_window(window: &TimeWindow, minutes: i32) -> Result<TimeWindow, ValidationError> {
    Ok(TimeWindow::new(
        clock::add_minutes(&window.start, minutes)?,
        clock::add_minutes(&window.end, minutes)?,
    ))
}

/// Shift the day's light windows by the traveler's chronotype.
pub fn adjust_light(
    light: &LightExposureWindow,
    chronotype: ChronotypeCategory,
) -> Result<LightExposureWindow, ValidationError> {
    let shift = light_shift_minutes(chronotype);
    if shift == 0 {
        return Ok(light.clone());
    }
    let mut adjusted = light.clone();
    adjusted.bright_light = shift_window(&light.bright_light, shift)?;
    if let Some(avoid) = &light.avoid_light {
        adjusted.avoid_light = Some(shift_window(avoid, shift)?);
    }
    Ok(adjusted)
}

/// Shift the day's sleep window by the traveler's chronotype, preserving
/// duration. Late evening types are floored at a 22:00 bed time.
pub fn adjust_sleep(
    timing: &SleepTiming,
    chronotype: ChronotypeCategory,
) -> Result<SleepTiming, ValidationError> {
    let shift = sleep_shift_minutes(chronotype);
    if shift == 0 {
        return Ok(timing.clone());
    }

    let duration = clock::time_difference(&timing.bed_time, &timing.wake_time)?;
    let mut bed_minutes = clock::time_to_minutes(&timing.bed_time)? + shift;

    if chronotype == ChronotypeCategory::LateEvening {
        // An adaptation plan can push bed time into the afternoon; never
        // earlier than 22:00 for a late evening type.
        let normalized = bed_minutes.rem_euclid(clock::MINUTES_PER_DAY);
        if (12 * 60..LATE_EVENING_BED_FLOOR).contains(&normalized) {
            bed_minutes = LATE_EVENING_BED_FLOOR;
        }
    }

    let bed_time = clock::minutes_to_time(bed_minutes);
    let wake_time = clock::add_minutes(&bed_time, duration)?;
    Ok(SleepTiming {
        bed_time,
        wake_time,
        total_days: timing.total_days,
    })
}

/// Personalized recovery-day estimate.
///
/// Baseline is half the offset (people recover faster than the full
/// 1h-per-day adaptation), adjusted for age and sleep quality, then
/// reconciled against any prior jetlag history.
pub fn expected_recovery_days(offset_hours: f64, profile: &UserProfile) -> u32 {
    let mut days = (offset_hours.abs() / 2.0).ceil() as i32;

    if profile.age > 60 {
        days += 1;
    } else if profile.age < 25 {
        days -= 1;
    }
    match profile.sleep_profile.sleep_quality {
        SleepQuality::Poor => days += 1,
        SleepQuality::Excellent => days -= 1,
        _ => {}
    }
    let baseline = days.max(1) as u32;

    match &profile.previous_jetlag_recovery {
        Some(prior) => baseline.max(prior.days_to_recover.saturating_sub(1)).max(1),
        None => baseline,
    }
}

/// Nap activities for the day, placed around the waking-period midpoint.
///
/// Poor sleepers get early, mid, and late candidates; everyone else gets
/// just the middle one. Empty when the traveler cannot nap.
pub fn nap_activities(
    timing: &SleepTiming,
    profile: &UserProfile,
) -> Result<Vec<Activity>, ValidationError> {
    if !profile.sleep_profile.can_nap {
        return Ok(Vec::new());
    }

    let waking = clock::time_difference(&timing.wake_time, &timing.bed_time)?;
    let midpoint = clock::add_minutes(&timing.wake_time, waking / 2)?;

    let starts = if profile.sleep_profile.sleep_quality == SleepQuality::Poor {
        vec![
            clock::subtract_minutes(&midpoint, 120)?,
            midpoint.clone(),
            clock::add_minutes(&midpoint, 120)?,
        ]
    } else {
        vec![midpoint]
    };

    starts
        .iter()
        .map(|start| builder::nap_activity(start))
        .collect()
}
