//! Activity conflict resolution
//!
//! Enforces two invariants on each day's activity list before it is
//! returned: no activity ends after the 21:30 evening ceiling, and no two
//! activities overlap. Windows that wrap past midnight (overnight sleep)
//! end the next morning and are exempt from the ceiling.
//!
//! Resolution is a greedy, single forward pass over activities sorted by
//! start time:
//!
//! - pass 1 truncates ends past the ceiling, pulling the start back when
//!   truncation would leave less than the minimum viable duration
//!   (60 minutes for light exposure, 30 otherwise)
//! - pass 2 walks adjacent pairs, shifting the follower forward past the
//!   leader, or truncating the leader when the shift would breach the
//!   ceiling
//! - an overnight (wrapping) window blocks the rest of its day, so any
//!   activity that starts after one begins is dropped
//!
//! Pairs are not revisited after being resolved, so pathological packings
//! can still leave a sub-minimum activity; real schedules are sparse enough
//! that this does not occur.

use tracing::trace;

use crate::clock;
use crate::error::ValidationError;
use crate::types::{Activity, ActivityType};

/// Latest allowed end of a non-wrapping activity (21:30).
pub const EVENING_CEILING: i32 = 21 * 60 + 30;

/// Minimum viable duration of a light-exposure activity.
const MIN_LIGHT_DURATION: i32 = 60;

/// Minimum viable duration of any other activity.
const MIN_ACTIVITY_DURATION: i32 = 30;

struct Slot {
    activity: Activity,
    start: i32,
    end: i32,
    wraps: bool,
}

fn min_duration(activity_type: ActivityType) -> i32 {
    if activity_type.is_light() {
        MIN_LIGHT_DURATION
    } else {
        MIN_ACTIVITY_DURATION
    }
}

/// Resolve a single day's activities into a non-overlapping list ending by
/// the evening ceiling, sorted by start time.
pub fn resolve(activities: Vec<Activity>) -> Result<Vec<Activity>, ValidationError> {
    let mut slots = activities
        .into_iter()
        .map(|activity| {
            let start = clock::time_to_minutes(&activity.time_window.start)?;
            let end = clock::time_to_minutes(&activity.time_window.end)?;
            Ok(Slot {
                wraps: end < start,
                activity,
                start,
                end,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    // Pass 1: evening ceiling.
    for slot in &mut slots {
        if !slot.wraps && slot.end > EVENING_CEILING {
            trace!(id = %slot.activity.id, "truncating activity to evening ceiling");
            slot.end = EVENING_CEILING;
            let minimum = min_duration(slot.activity.activity_type);
            if slot.end - slot.start < minimum {
                slot.start = slot.end - minimum;
            }
        }
    }

    // Wrapping windows sort after same-start windows so an overnight sleep
    // never becomes the leader of a pair it fully covers.
    slots.sort_by_key(|slot| (slot.start, slot.wraps));

    // Pass 2: pairwise overlaps, leader before follower.
    let mut resolved: Vec<Slot> = Vec::with_capacity(slots.len());
    for mut slot in slots {
        let Some(leader) = resolved.last_mut() else {
            resolved.push(slot);
            continue;
        };
        let leader_end = if leader.wraps {
            // A wrapping window blocks the rest of its day.
            clock::MINUTES_PER_DAY
        } else {
            leader.end
        };
        if leader_end <= slot.start {
            resolved.push(slot);
            continue;
        }

        if leader.wraps {
            // Once an overnight window begins nothing else fits in the
            // evening; the activity is dropped rather than shifted into
            // the night.
            trace!(id = %slot.activity.id, "dropping activity inside an overnight window");
            continue;
        }

        let overlap = leader_end - slot.start;
        let shifted_end = effective_end(&slot) + overlap;
        if !slot.wraps && shifted_end <= EVENING_CEILING {
            trace!(id = %slot.activity.id, overlap, "shifting activity past its predecessor");
            slot.start += overlap;
            slot.end += overlap;
        } else if slot.start >= leader.start {
            trace!(id = %leader.activity.id, "truncating activity before its successor");
            leader.end = slot.start;
            let minimum = min_duration(leader.activity.activity_type);
            if leader.end - leader.start < minimum {
                leader.start = leader.end - minimum;
            }
        }
        // An earlier shift can leapfrog the leader past the follower; that
        // packing is left as-is rather than inverted.
        resolved.push(slot);
    }

    Ok(resolved
        .into_iter()
        .map(|slot| {
            let mut activity = slot.activity;
            activity.time_window.start = clock::minutes_to_time(slot.start);
            activity.time_window.end = clock::minutes_to_time(slot.end);
            activity
        })
        .collect())
}

fn effective_end(slot: &Slot) -> i32 {
    if slot.wraps {
        clock::MINUTES_PER_DAY
    } else {
        slot.end
    }
}
