//! Circadia CLI - Command-line interface for the adaptation engine
//!
//! Commands:
//! - generate: Produce a full adaptation schedule from a request JSON
//! - severity: Score a flight's jetlag severity
//! - profile: Derive a chronotype profile from habitual sleep times

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use circadia::types::{CircadianPhase, Flight, SleepProfile, UserProfile};
use circadia::{chronotype, schedule, severity, CIRCADIA_VERSION};

/// Circadia - circadian adaptation schedule engine for air travelers
#[derive(Parser)]
#[command(name = "circadia")]
#[command(version = CIRCADIA_VERSION)]
#[command(about = "Generate jetlag adaptation schedules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce a full adaptation schedule from a request JSON
    Generate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Score a flight's jetlag severity
    Severity {
        /// Input file path with a flight JSON (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Derive a chronotype profile from habitual sleep times
    Profile {
        /// Traveler age in years
        #[arg(long)]
        age: u32,

        /// Habitual bed time (HH:MM)
        #[arg(long)]
        bed_time: String,

        /// Habitual wake time (HH:MM)
        #[arg(long)]
        wake_time: String,
    },
}

/// A schedule-generation request: the flight plus optional phase and
/// profile, as the engine's entry point takes them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleRequest {
    flight: Flight,
    #[serde(default)]
    phase: Option<CircadianPhase>,
    #[serde(default)]
    profile: Option<UserProfile>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CircadiaCliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            pretty,
        } => cmd_generate(&input, &output, pretty),
        Commands::Severity { input, pretty } => cmd_severity(&input, pretty),
        Commands::Profile {
            age,
            bed_time,
            wake_time,
        } => cmd_profile(age, &bed_time, &wake_time),
    }
}

fn cmd_generate(input: &PathBuf, output: &PathBuf, pretty: bool) -> Result<(), CircadiaCliError> {
    let request: ScheduleRequest = serde_json::from_str(&read_input(input)?)?;
    let result = schedule::generate_activity_schedule(
        &request.flight,
        request.phase.as_ref(),
        request.profile.as_ref(),
    )?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    if output.to_string_lossy() == "-" {
        println!("{rendered}");
    } else {
        fs::write(output, rendered)?;
    }
    Ok(())
}

fn cmd_severity(input: &PathBuf, pretty: bool) -> Result<(), CircadiaCliError> {
    let flight: Flight = serde_json::from_str(&read_input(input)?)?;
    flight.validate()?;
    let result = severity::estimate(&flight, None)?;

    if pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn cmd_profile(age: u32, bed_time: &str, wake_time: &str) -> Result<(), CircadiaCliError> {
    let sleep_profile = SleepProfile {
        typical_bed_time: bed_time.to_string(),
        typical_wake_time: wake_time.to_string(),
        sleep_quality: circadia::SleepQuality::Good,
        sleep_latency: 15,
        can_nap: true,
        consistent_schedule: true,
    };
    let profile = chronotype::derive_profile(age, sleep_profile, None)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn read_input(path: &PathBuf) -> Result<String, CircadiaCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

// Error types

#[derive(Debug)]
enum CircadiaCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Validation(circadia::ValidationError),
}

impl From<io::Error> for CircadiaCliError {
    fn from(e: io::Error) -> Self {
        CircadiaCliError::Io(e)
    }
}

impl From<serde_json::Error> for CircadiaCliError {
    fn from(e: serde_json::Error) -> Self {
        CircadiaCliError::Json(e)
    }
}

impl From<circadia::ValidationError> for CircadiaCliError {
    fn from(e: circadia::ValidationError) -> Self {
        CircadiaCliError::Validation(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CircadiaCliError> for CliError {
    fn from(e: CircadiaCliError) -> Self {
        match e {
            CircadiaCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CircadiaCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check request JSON syntax and field names".to_string()),
            },
            CircadiaCliError::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check flight endpoints, layovers, and HH:MM times".to_string()),
            },
        }
    }
}
