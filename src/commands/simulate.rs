//! Implementation of the simulate command for watching the countdown roll over.
//!
//! Runs the normal live countdown on a simulated clock that starts at the
//! given time and advances `multiplier` seconds per real second, so a whole
//! day/night cycle can be watched in minutes.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;

use crate::Daybreak;
use crate::geo::{Position, solar::determine_timezone_from_coordinates};
use crate::state::AppState;
use crate::time::{
    SimulatedClock,
    source::{parse_datetime, parse_datetime_in_tz},
};

/// Handle the simulate command.
///
/// # Arguments
/// * `start_time` - Start time in format "YYYY-MM-DD HH:MM:SS"
/// * `multiplier` - Simulated seconds per real second
/// * `coords` - Coordinates overriding the configuration
/// * `debug_enabled` - Whether debug mode is enabled
pub async fn handle_simulate_command(
    start_time: &str,
    multiplier: f64,
    coords: Option<Position>,
    debug_enabled: bool,
) -> Result<AppState> {
    let known_position = match coords {
        Some(position) => Some(position),
        None => super::load_config(None)?.position(),
    };

    let start = parse_start(start_time, known_position).map_err(|e| {
        super::help::show_command_usage("simulate");
        anyhow::anyhow!("Invalid start time: {e}")
    })?;

    log_version!();
    log_block_start!("Simulating from {}", start.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"));
    log_indented!("Time multiplier: {multiplier}x");
    log_indented!("Press Ctrl+C to stop");

    let clock = Arc::new(SimulatedClock::new(start, multiplier));
    Daybreak::new(debug_enabled)
        .with_clock(clock)
        .with_position(coords)
        .without_headers()
        .run()
        .await
}

/// Parse the start as wall-clock time at the position, or locally when the
/// position is not known before locating.
fn parse_start(start_time: &str, position: Option<Position>) -> Result<DateTime<Utc>, String> {
    match position {
        Some(position) => {
            let tz = determine_timezone_from_coordinates(position.latitude(), position.longitude());
            parse_datetime_in_tz(start_time, tz)
        }
        None => parse_datetime(start_time),
    }
}
