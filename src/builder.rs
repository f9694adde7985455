//! Activity builder
//!
//! Turns circadian-model outputs into typed `Activity` records with stable
//! priorities and human-readable notes:
//!
//! - sleep (High) from the day's shifted sleep timing
//! - bright light (Critical) and avoid light (High) from the light windows
//! - melatonin (High): a 30-minute window whose lead time before bed scales
//!   with the timezone offset
//! - caffeine cutoff (Medium): a 30-minute marker ending 6 hours before bed
//! - meals (Medium): breakfast anchored to wake, lunch fixed, dinner earlier
//!   eastward than westward
//! - exercise (Medium): mid-morning, only when a profile opted the traveler
//!   in
//! - naps (Low): 20-minute windows placed by the personalization layer

use uuid::Uuid;

use crate::clock;
use crate::error::ValidationError;
use crate::types::{
    Activity, ActivityPriority, ActivityType, Direction, LightExposureWindow, SleepTiming,
    SupplementType, TimeWindow,
};

/// Minutes of melatonin lead time per hour of timezone offset.
const MELATONIN_LEAD_PER_HOUR: f64 = 15.0;
const MELATONIN_LEAD_MIN: f64 = 30.0;
const MELATONIN_LEAD_MAX: f64 = 300.0;

/// No caffeine within 6 hours of bed.
const CAFFEINE_CUTOFF_BEFORE_BED: i32 = 360;

/// Nap length in minutes, short enough to avoid deep sleep.
pub const NAP_DURATION: i32 = 20;

fn make_activity(
    activity_type: ActivityType,
    time_window: TimeWindow,
    priority: ActivityPriority,
    notes: &str,
) -> Activity {
    Activity {
        id: Uuid::new_v4().to_string(),
        activity_type,
        time_window,
        priority,
        supplement_type: None,
        notes: Some(notes.to_string()),
    }
}

/// Sleep window for the day, wrapping past midnight when bed is late.
pub fn sleep_activity(timing: &SleepTiming) -> Activity {
    make_activity(
        ActivityType::Sleep,
        TimeWindow::new(timing.bed_time.clone(), timing.wake_time.clone()),
        ActivityPriority::High,
        "Target sleep window for this adaptation day",
    )
}

/// Bright-light and avoid-light activities from the day's light windows.
pub fn light_activities(light: &LightExposureWindow) -> Vec<Activity> {
    let mut activities = vec![make_activity(
        ActivityType::BrightLight,
        light.bright_light.clone(),
        ActivityPriority::Critical,
        &light.description,
    )];
    if let Some(avoid) = &light.avoid_light {
        activities.push(make_activity(
            ActivityType::AvoidLight,
            avoid.clone(),
            ActivityPriority::High,
            "Avoid bright light; wear sunglasses or dim the room",
        ));
    }
    activities
}

/// Melatonin lead time before bed, scaled by the size of the shift.
pub fn melatonin_lead_minutes(offset_hours: f64) -> i32 {
    (MELATONIN_LEAD_MIN + MELATONIN_LEAD_PER_HOUR * offset_hours.abs())
        .clamp(MELATONIN_LEAD_MIN, MELATONIN_LEAD_MAX) as i32
}

/// A 30-minute melatonin window ending its lead time before bed.
pub fn melatonin_activity(bed_time: &str, offset_hours: f64) -> Result<Activity, ValidationError> {
    let lead = melatonin_lead_minutes(offset_hours);
    let end = clock::subtract_minutes(bed_time, lead)?;
    let start = clock::subtract_minutes(&end, 30)?;
    let mut activity = make_activity(
        ActivityType::Supplement,
        TimeWindow::new(start, end),
        ActivityPriority::High,
        "Take melatonin to reinforce the target sleep phase",
    );
    activity.supplement_type = Some(SupplementType::Melatonin);
    Ok(activity)
}

/// A 30-minute last-caffeine marker ending 6 hours before bed.
pub fn caffeine_cutoff_activity(bed_time: &str) -> Result<Activity, ValidationError> {
    let end = clock::subtract_minutes(bed_time, CAFFEINE_CUTOFF_BEFORE_BED)?;
    let start = clock::subtract_minutes(&end, 30)?;
    Ok(make_activity(
        ActivityType::Caffeine,
        TimeWindow::new(start, end),
        ActivityPriority::Medium,
        "Last caffeine of the day; none within 6 hours of bed",
    ))
}

/// Breakfast, lunch, and dinner for the day. Meal timing is a secondary
/// zeitgeber, so meals anchor to the destination clock from day one.
pub fn meal_activities(
    wake_time: &str,
    direction: Direction,
) -> Result<Vec<Activity>, ValidationError> {
    let breakfast_start = clock::add_minutes(wake_time, 30)?;
    let breakfast_end = clock::add_minutes(&breakfast_start, 30)?;

    let dinner_start = match direction {
        Direction::Eastward => "18:00",
        Direction::Westward => "19:00",
    };
    let dinner_end = clock::add_minutes(dinner_start, 45)?;

    Ok(vec![
        make_activity(
            ActivityType::Meal,
            TimeWindow::new(breakfast_start, breakfast_end),
            ActivityPriority::Medium,
            "Breakfast shortly after waking anchors the day",
        ),
        make_activity(
            ActivityType::Meal,
            TimeWindow::new("13:00", "13:45"),
            ActivityPriority::Medium,
            "Lunch at local midday",
        ),
        make_activity(
            ActivityType::Meal,
            TimeWindow::new(dinner_start, dinner_end),
            ActivityPriority::Medium,
            "Dinner on the destination clock",
        ),
    ])
}

/// Light exercise two hours after waking.
pub fn exercise_activity(wake_time: &str) -> Result<Activity, ValidationError> {
    let start = clock::add_minutes(wake_time, 120)?;
    let end = clock::add_minutes(&start, 30)?;
    Ok(make_activity(
        ActivityType::Exercise,
        TimeWindow::new(start, end),
        ActivityPriority::Medium,
        "Light exercise helps shift the clock and fight fatigue",
    ))
}

/// A 20-minute nap at the given start time.
pub fn nap_activity(start: &str) -> Result<Activity, ValidationError> {
    let end = clock::add_minutes(start, NAP_DURATION)?;
    Ok(make_activity(
        ActivityType::Nap,
        TimeWindow::new(start.to_string(), end),
        ActivityPriority::Low,
        "Short nap; keep it under 20 minutes to avoid deep sleep",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_timing() -> SleepTiming {
        SleepTiming {
            bed_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
            total_days: 8,
        }
    }

    #[test]
    fn test_sleep_activity_spans_the_sleep_window() {
        let activity = sleep_activity(&make_timing());
        assert_eq!(activity.activity_type, ActivityType::Sleep);
        assert_eq!(activity.time_window, TimeWindow::new("23:00", "07:00"));
        assert_eq!(activity.priority, ActivityPriority::High);
    }

    #[test]
    fn test_activities_get_unique_ids() {
        let a = sleep_activity(&make_timing());
        let b = sleep_activity(&make_timing());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_melatonin_lead_scales_and_clamps() {
        assert_eq!(melatonin_lead_minutes(0.0), 30);
        assert_eq!(melatonin_lead_minutes(8.0), 150);
        assert_eq!(melatonin_lead_minutes(-8.0), 150);
        assert_eq!(melatonin_lead_minutes(20.0), 300);
    }

    #[test]
    fn test_melatonin_window_ends_lead_minutes_before_bed() {
        // Lead for |8| hours is 150 min: 23:00 - 150 = 20:30.
        let activity = melatonin_activity("23:00", 8.0).unwrap();
        assert_eq!(activity.time_window, TimeWindow::new("20:00", "20:30"));
        assert_eq!(activity.supplement_type, Some(SupplementType::Melatonin));
        assert_eq!(activity.priority, ActivityPriority::High);
    }

    #[test]
    fn test_caffeine_cutoff_ends_six_hours_before_bed() {
        let activity = caffeine_cutoff_activity("23:00").unwrap();
        assert_eq!(activity.time_window, TimeWindow::new("16:30", "17:00"));
        assert_eq!(activity.activity_type, ActivityType::Caffeine);
    }

    #[test]
    fn test_meals_follow_direction() {
        let east = meal_activities("07:00", Direction::Eastward).unwrap();
        assert_eq!(east.len(), 3);
        assert_eq!(east[0].time_window, TimeWindow::new("07:30", "08:00"));
        assert_eq!(east[1].time_window, TimeWindow::new("13:00", "13:45"));
        assert_eq!(east[2].time_window, TimeWindow::new("18:00", "18:45"));

        let west = meal_activities("07:00", Direction::Westward).unwrap();
        assert_eq!(west[2].time_window, TimeWindow::new("19:00", "19:45"));
    }

    #[test]
    fn test_light_activities_keep_window_priorities() {
        let light = crate::circadian::light_timing(
            8.0,
            &crate::types::CircadianPhase::neutral(),
        )
        .unwrap();
        let activities = light_activities(&light);
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].activity_type, ActivityType::BrightLight);
        assert_eq!(activities[0].priority, ActivityPriority::Critical);
        assert_eq!(activities[1].activity_type, ActivityType::AvoidLight);
        assert_eq!(activities[1].priority, ActivityPriority::High);
    }

    #[test]
    fn test_exercise_and_nap_windows() {
        let exercise = exercise_activity("07:00").unwrap();
        assert_eq!(exercise.time_window, TimeWindow::new("09:00", "09:30"));

        let nap = nap_activity("14:30").unwrap();
        assert_eq!(nap.time_window, TimeWindow::new("14:30", "14:50"));
        assert_eq!(nap.priority, ActivityPriority::Low);
    }
}
