//! Formatting helpers for positions and solar times.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;

use super::solar::{SolarTimes, clamp_latitude};
use super::Position;

/// Format a UTC offset as `+HH:MM`.
pub fn format_offset(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.abs();
    format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}

/// Log the day's solar times at a position in the position's timezone.
pub fn log_solar_times(position: &Position, tz: Tz, times: &SolarTimes) {
    let local = |t: DateTime<Utc>| t.with_timezone(&tz);
    let sunrise = local(times.sunrise);
    let offset = format_offset(sunrise.offset().fix().local_minus_utc());

    log_block_start!("Sun times for {position}");
    log_indented!("       Timezone: {tz} ({offset})");
    log_indented!("        Sunrise: {}", sunrise.format("%Y-%m-%d %H:%M:%S"));
    log_indented!("         Sunset: {}", local(times.sunset).format("%Y-%m-%d %H:%M:%S"));

    let day_length = times.day_length();
    log_indented!(
        "     Day length: {}h {:02}m",
        day_length.num_hours(),
        day_length.num_minutes() % 60
    );

    let clamped = clamp_latitude(position.latitude());
    if clamped != position.latitude() {
        log_indented!("Latitude clamped to {clamped:.1}° for polar calculations");
    }
}
