//! Locate command - show where daybreak thinks you are.
//!
//! Acquires the position once, resolves its place name, and prints both along
//! with the day's sunrise and sunset at that position.

use anyhow::Result;
use chrono::Utc;

use crate::geo::{
    AstronomicalCalculator, SolarCalculator, acquire_location, display::log_solar_times,
    resolve_place_name,
};

/// Handle the locate command.
pub async fn handle_locate_command(coords: Option<crate::geo::Position>) -> Result<()> {
    let config = super::load_config(coords)?;
    let (locator, resolver) = crate::geo::build_lookups(&config)?;

    log_block_start!("Locating via {}...", locator.describe());
    let position = acquire_location(&locator)
        .await
        .map_err(|e| super::location_failure(&e))?;

    let place = match &resolver {
        Some(resolver) => resolve_place_name(resolver, position).await,
        None => position.format_coordinates(),
    };

    log_block_start!("Place: {place}");
    log_indented!("Coordinates: {position}");

    let calculator = AstronomicalCalculator;
    let date = calculator.calendar_date(Utc::now(), &position);
    let times = calculator.solar_times(date, &position);
    log_solar_times(&position, calculator.timezone(&position), &times);
    log_end!();

    Ok(())
}
