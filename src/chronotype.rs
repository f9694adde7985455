//! Chronotype assessment and profile derivation
//!
//! Two ways to place a traveler on the five-point chronotype scale:
//!
//! - `assess` scores questionnaire answers about natural bed time, natural
//!   wake time, and weekend consistency
//! - `derive_profile` classifies the age-adjusted mid-sleep point of the
//!   traveler's habitual sleep window (younger people skew later, older
//!   people earlier)

use crate::clock;
use crate::error::ValidationError;
use crate::types::{ChronotypeCategory, PriorRecovery, SleepProfile, UserProfile};

/// One answer in the chronotype questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentAnswer {
    /// "When would you naturally go to bed?" ("HH:MM")
    NaturalBedTime(String),
    /// "When would you naturally wake up?" ("HH:MM")
    NaturalWakeTime(String),
    /// "Do you keep a similar schedule on weekends?"
    WeekendConsistency { similar: bool },
}

/// Score questionnaire answers into a chronotype category.
///
/// A consistent weekend schedule strengthens whichever tendency the other
/// answers show; without any strong signal the result is `Neutral`.
pub fn assess(answers: &[AssessmentAnswer]) -> Result<ChronotypeCategory, ValidationError> {
    let mut morning = 0;
    let mut evening = 0;

    for answer in answers {
        match answer {
            AssessmentAnswer::NaturalBedTime(time) => {
                // Bed times before noon count as after midnight.
                let mut bed = clock::time_to_minutes(time)?;
                if bed < 12 * 60 {
                    bed += clock::MINUTES_PER_DAY;
                }
                if bed < 22 * 60 {
                    morning += 2;
                } else {
                    evening += 2;
                }
            }
            AssessmentAnswer::NaturalWakeTime(time) => {
                let wake = clock::time_to_minutes(time)?;
                if wake < 6 * 60 {
                    morning += 2;
                } else if wake > 9 * 60 {
                    evening += 2;
                }
            }
            AssessmentAnswer::WeekendConsistency { similar } => {
                if *similar {
                    morning += 1;
                    evening += 1;
                }
            }
        }
    }

    Ok(if morning > evening + 4 {
        ChronotypeCategory::EarlyMorning
    } else if morning > evening {
        ChronotypeCategory::ModerateMorning
    } else if evening > morning + 4 {
        ChronotypeCategory::LateEvening
    } else if evening > morning {
        ChronotypeCategory::ModerateEvening
    } else {
        ChronotypeCategory::Neutral
    })
}

/// Build a `UserProfile` by classifying the habitual sleep window.
///
/// Mid-sleep is shifted 60 minutes later for travelers under 25 and 60
/// minutes earlier for those over 60 before classification.
pub fn derive_profile(
    age: u32,
    sleep_profile: SleepProfile,
    previous_jetlag_recovery: Option<PriorRecovery>,
) -> Result<UserProfile, ValidationError> {
    let mid = mid_sleep(
        &sleep_profile.typical_bed_time,
        &sleep_profile.typical_wake_time,
    )?;
    let age_adjustment = if age < 25 {
        60
    } else if age > 60 {
        -60
    } else {
        0
    };
    let adjusted = (mid + age_adjustment).rem_euclid(clock::MINUTES_PER_DAY);

    let chronotype = if adjusted < 2 * 60 {
        ChronotypeCategory::EarlyMorning
    } else if adjusted < 3 * 60 {
        ChronotypeCategory::ModerateMorning
    } else if adjusted < 4 * 60 {
        ChronotypeCategory::Neutral
    } else if adjusted < 5 * 60 {
        ChronotypeCategory::ModerateEvening
    } else {
        ChronotypeCategory::LateEvening
    };

    Ok(UserProfile {
        age,
        chronotype,
        sleep_profile,
        previous_jetlag_recovery,
    })
}

/// Midpoint of the sleep window, normalized to a clock time in minutes.
fn mid_sleep(bed_time: &str, wake_time: &str) -> Result<i32, ValidationError> {
    let bed = clock::time_to_minutes(bed_time)?;
    let mut wake = clock::time_to_minutes(wake_time)?;
    if wake < bed {
        wake += clock::MINUTES_PER_DAY;
    }
    Ok(((bed + wake) / 2).rem_euclid(clock::MINUTES_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SleepQuality;
    use pretty_assertions::assert_eq;

    fn make_sleep_profile(bed: &str, wake: &str) -> SleepProfile {
        SleepProfile {
            typical_bed_time: bed.to_string(),
            typical_wake_time: wake.to_string(),
            sleep_quality: SleepQuality::Good,
            sleep_latency: 15,
            can_nap: true,
            consistent_schedule: true,
        }
    }

    #[test]
    fn test_assess_morning_tendency() {
        let answers = vec![
            AssessmentAnswer::NaturalBedTime("21:30".to_string()),
            AssessmentAnswer::NaturalWakeTime("05:30".to_string()),
            AssessmentAnswer::WeekendConsistency { similar: true },
        ];
        assert_eq!(
            assess(&answers).unwrap(),
            ChronotypeCategory::ModerateMorning
        );
    }

    #[test]
    fn test_assess_evening_tendency() {
        let answers = vec![
            AssessmentAnswer::NaturalBedTime("01:30".to_string()),
            AssessmentAnswer::NaturalWakeTime("09:30".to_string()),
        ];
        assert_eq!(
            assess(&answers).unwrap(),
            ChronotypeCategory::ModerateEvening
        );
    }

    #[test]
    fn test_assess_balanced_answers_are_neutral() {
        let answers = vec![
            AssessmentAnswer::NaturalBedTime("21:30".to_string()),
            AssessmentAnswer::NaturalWakeTime("09:30".to_string()),
            AssessmentAnswer::WeekendConsistency { similar: true },
        ];
        assert_eq!(assess(&answers).unwrap(), ChronotypeCategory::Neutral);
        assert_eq!(assess(&[]).unwrap(), ChronotypeCategory::Neutral);
    }

    #[test]
    fn test_assess_late_bedtime_scores_evening() {
        // Any bed time from 22:00 on counts toward the evening side, not
        // just those past midnight.
        let answers = vec![AssessmentAnswer::NaturalBedTime("23:00".to_string())];
        assert_eq!(
            assess(&answers).unwrap(),
            ChronotypeCategory::ModerateEvening
        );

        let answers = vec![AssessmentAnswer::NaturalBedTime("22:00".to_string())];
        assert_eq!(
            assess(&answers).unwrap(),
            ChronotypeCategory::ModerateEvening
        );
    }

    #[test]
    fn test_assess_rejects_malformed_times() {
        let answers = vec![AssessmentAnswer::NaturalBedTime("late".to_string())];
        assert!(assess(&answers).is_err());
    }

    #[test]
    fn test_mid_sleep_wraps_midnight() {
        assert_eq!(mid_sleep("23:00", "07:00").unwrap(), 180);
        assert_eq!(mid_sleep("00:30", "08:30").unwrap(), 270);
        assert_eq!(mid_sleep("21:00", "05:00").unwrap(), 60);
    }

    #[test]
    fn test_derive_profile_classifies_mid_sleep() {
        // Mid-sleep 03:00 is squarely neutral.
        let profile = derive_profile(35, make_sleep_profile("23:00", "07:00"), None).unwrap();
        assert_eq!(profile.chronotype, ChronotypeCategory::Neutral);

        // Mid-sleep 01:00 is an early riser.
        let early = derive_profile(35, make_sleep_profile("21:00", "05:00"), None).unwrap();
        assert_eq!(early.chronotype, ChronotypeCategory::EarlyMorning);

        // Mid-sleep 05:30 is a night owl.
        let late = derive_profile(35, make_sleep_profile("01:30", "09:30"), None).unwrap();
        assert_eq!(late.chronotype, ChronotypeCategory::LateEvening);
    }

    #[test]
    fn test_derive_profile_age_adjustment() {
        // Same window, shifted classification by age.
        let window = make_sleep_profile("23:00", "07:00");
        let young = derive_profile(22, window.clone(), None).unwrap();
        assert_eq!(young.chronotype, ChronotypeCategory::ModerateEvening);

        let older = derive_profile(65, window, None).unwrap();
        assert_eq!(older.chronotype, ChronotypeCategory::ModerateMorning);
    }
}
