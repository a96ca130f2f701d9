//! Status command - evaluate the countdown once and print it.
//!
//! Runs the same session the live view uses, but for a single instant: the
//! current time, or the one given with `--at`. Supports JSON and
//! human-readable output.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::common::logger::Log;
use crate::core::countdown::EventKind;
use crate::display::Backgrounds;
use crate::geo::{
    Geolocator, PlaceNameResolver, Position, SolarCalculator, acquire_location,
    resolve_place_name,
};
use crate::state::{DisplayState, Session};
use crate::time::{Clock, FixedClock, SystemClock, source::parse_datetime_in_tz};

/// Everything `status` reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub display: DisplayState,
    pub next_event: EventKind,
    pub next_event_at: DateTime<Utc>,
    pub evaluated_at: DateTime<Utc>,
    pub position: Position,
    pub background: String,
}

/// Handle the status command.
///
/// # Arguments
/// * `json` - Output in JSON format
/// * `at` - Evaluate at this local datetime instead of now
/// * `lookup` - Resolve a place name (otherwise coordinates are shown)
/// * `coords` - Coordinates overriding the configuration
pub async fn handle_status_command(
    json: bool,
    at: Option<&str>,
    lookup: bool,
    coords: Option<Position>,
) -> Result<()> {
    if json {
        // stdout carries only the JSON document
        Log::set_enabled(false);
    }

    let config = super::load_config(coords)?;
    let (locator, resolver) = crate::geo::build_lookups(&config)?;
    let resolver = resolver.filter(|_| lookup);

    let position = acquire_location(&locator)
        .await
        .map_err(|e| super::location_failure(&e))?;

    let clock = evaluation_clock(at, &position)?;

    let report = evaluate_status(
        &FixedPosition(position),
        resolver.as_ref(),
        crate::geo::AstronomicalCalculator,
        clock,
        &config.backgrounds(),
    )
    .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize status")?
        );
    } else {
        display_human_readable(&report);
    }
    Ok(())
}

/// Clock for the evaluation: `--at` is wall-clock time at the position.
fn evaluation_clock(at: Option<&str>, position: &Position) -> Result<Arc<dyn Clock>> {
    let Some(when) = at else {
        return Ok(Arc::new(SystemClock));
    };

    let tz = crate::geo::AstronomicalCalculator.timezone(position);
    let instant = parse_datetime_in_tz(when, tz).map_err(|e| {
        super::help::show_command_usage("status");
        anyhow::anyhow!("Invalid --at value: {e}")
    })?;
    Ok(Arc::new(FixedClock(instant)))
}

/// Run one session tick at the clock's instant.
///
/// Location failures come back as the user-facing message.
pub async fn evaluate_status<G, R, C>(
    locator: &G,
    resolver: Option<&R>,
    calculator: C,
    clock: Arc<dyn Clock>,
    backgrounds: &Backgrounds,
) -> Result<StatusReport>
where
    G: Geolocator,
    R: PlaceNameResolver,
    C: SolarCalculator,
{
    let mut session = Session::new(calculator, clock);
    session.begin_locating()?;

    let position = match acquire_location(locator).await {
        Ok(position) => position,
        Err(e) => {
            session.location_failed(&e)?;
            return Err(super::location_failure(&e));
        }
    };
    session.location_acquired(position)?;

    let place = match resolver {
        Some(resolver) => resolve_place_name(resolver, position).await,
        None => position.format_coordinates(),
    };
    session.set_place_name(place);

    let countdown = session
        .countdown()
        .context("Countdown unavailable without a position")?;
    let display = DisplayState::new(&countdown, session.place_name());

    Ok(StatusReport {
        background: backgrounds.select(display.is_day).to_string(),
        display,
        next_event: countdown.next.kind,
        next_event_at: countdown.next.instant,
        evaluated_at: session.clock().now(),
        position,
    })
}

/// Display the report in human-readable format.
fn display_human_readable(report: &StatusReport) {
    let local = |t: DateTime<Utc>| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");

    println!("         Place: {}", report.display.place_name);
    println!("      Position: {}", report.position);
    println!(
        " Current phase: {}",
        if report.display.is_day { "Day" } else { "Night" }
    );
    println!(
        "    Next event: {} at {}",
        report.next_event,
        local(report.next_event_at)
    );
    println!(
        "     Countdown: {} {}",
        report.display.countdown_text, report.display.event_label
    );
    println!("    Background: {}", report.background);
}

/// The already acquired position, handed to the session as its locator.
struct FixedPosition(Position);

impl Geolocator for FixedPosition {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Position, crate::geo::GeolocationError> {
        Ok(self.0)
    }
}
