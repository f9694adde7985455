//! Circadia - circadian adaptation schedule engine for air travelers
//!
//! Circadia turns a flight record and a traveler's habitual sleep phase into
//! a multi-day adaptation plan through a deterministic pipeline: timezone
//! resolution → severity estimation → circadian light/sleep timing →
//! personalization → activity building → conflict resolution.
//!
//! ## Modules
//!
//! - **Circadian Model**: CBT-min estimation and light/sleep timing rules
//! - **Severity Estimator**: 0-10 jetlag severity and adaptation-day count
//! - **Schedule Assembler**: the `generate_activity_schedule` entry point

pub mod builder;
pub mod chronotype;
pub mod circadian;
pub mod clock;
pub mod error;
pub mod personalize;
pub mod resolver;
pub mod schedule;
pub mod severity;
pub mod timezone;
pub mod types;

pub use chronotype::{assess, derive_profile, AssessmentAnswer};
pub use error::ValidationError;
pub use schedule::generate_activity_schedule;
pub use severity::{estimate, JetlagSeverity, SeverityFactors};
pub use timezone::TimezoneSpec;
pub use types::{
    Activity, ActivityPriority, ActivitySchedule, ActivityType, AdaptationDay, ChronotypeCategory,
    CircadianPhase, Direction, Flight, FlightEndpoint, Layover, SleepProfile, SleepQuality,
    SleepTiming, TimeWindow, UserProfile,
};

/// Engine version embedded in CLI output
pub const CIRCADIA_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for CLI output
pub const PRODUCER_NAME: &str = "circadia";
