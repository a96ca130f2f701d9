//! Countdown engine: which solar event is next, and how long until it.
//!
//! The engine is a pure function of `(now, position, calculator)`. It holds no
//! state between calls, so two calls with the same inputs always agree.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::ROLLOVER_LOOKAHEAD_DAYS;
use crate::geo::{Position, SolarCalculator};

/// The two boundary events between day and night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Sunrise,
    Sunset,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Sunrise => "Sunrise",
            EventKind::Sunset => "Sunset",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The upcoming boundary event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextEvent {
    pub instant: DateTime<Utc>,
    pub kind: EventKind,
}

/// Result of one engine evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub next: NextEvent,
    pub is_day: bool,
    /// Time from `now` until `next.instant`, never negative.
    #[serde(skip)]
    pub remaining: Duration,
}

impl Countdown {
    /// The remaining time as `HH:MM:SS`.
    pub fn text(&self) -> String {
        format_countdown(self.remaining)
    }
}

/// Determine day/night and the next sunrise or sunset.
///
/// `is_day` holds iff `sunrise <= now < sunset` for the calendar day of `now`
/// at `position`. During the day the next event is that day's sunset,
/// otherwise that day's sunrise. When the candidate has already passed (after
/// sunset, or exactly at an event), the following days are searched for the
/// first event strictly after `now`.
pub fn compute_next_event<C: SolarCalculator + ?Sized>(
    now: DateTime<Utc>,
    position: &Position,
    calculator: &C,
) -> Countdown {
    let today = calculator.calendar_date(now, position);
    let times = calculator.solar_times(today, position);
    let is_day = times.contains(now);

    let candidate = if is_day {
        NextEvent {
            instant: times.sunset,
            kind: EventKind::Sunset,
        }
    } else {
        NextEvent {
            instant: times.sunrise,
            kind: EventKind::Sunrise,
        }
    };

    let next = if candidate.instant > now {
        candidate
    } else {
        roll_forward(now, today, position, calculator)
    };

    Countdown {
        next,
        is_day,
        remaining: (next.instant - now).max(Duration::zero()),
    }
}

/// First event strictly after `now` on the days following `today`.
fn roll_forward<C: SolarCalculator + ?Sized>(
    now: DateTime<Utc>,
    today: NaiveDate,
    position: &Position,
    calculator: &C,
) -> NextEvent {
    let mut fallback = None;
    let mut date = today;

    for _ in 0..ROLLOVER_LOOKAHEAD_DAYS {
        let Some(following) = date.succ_opt() else {
            break;
        };
        date = following;

        let times = calculator.solar_times(date, position);
        let sunrise = NextEvent {
            instant: times.sunrise,
            kind: EventKind::Sunrise,
        };
        fallback.get_or_insert(sunrise);

        let sunset = NextEvent {
            instant: times.sunset,
            kind: EventKind::Sunset,
        };
        if let Some(event) = [sunrise, sunset].into_iter().find(|e| e.instant > now) {
            return event;
        }
    }

    // Calculator output that never moves past `now`: count down to zero
    // instead of inventing an instant.
    fallback.unwrap_or(NextEvent {
        instant: now,
        kind: EventKind::Sunrise,
    })
}

/// Format a duration as zero-padded `HH:MM:SS`.
///
/// Sub-second remainders are truncated and hours keep counting past 24.
/// Negative durations render as `00:00:00`.
pub fn format_countdown(remaining: Duration) -> String {
    format_millis(remaining.num_milliseconds())
}

/// Format a millisecond count as zero-padded `HH:MM:SS`.
pub fn format_millis(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::SolarTimes;
    use chrono::{NaiveTime, TimeZone};
    use chrono_tz::Tz;

    /// Calculator returning the same wall-clock sunrise/sunset (UTC) every day.
    struct DailyTimes {
        sunrise: NaiveTime,
        sunset: NaiveTime,
    }

    impl DailyTimes {
        fn new(sunrise: (u32, u32), sunset: (u32, u32)) -> Self {
            Self {
                sunrise: NaiveTime::from_hms_opt(sunrise.0, sunrise.1, 0).unwrap(),
                sunset: NaiveTime::from_hms_opt(sunset.0, sunset.1, 0).unwrap(),
            }
        }
    }

    impl SolarCalculator for DailyTimes {
        fn solar_times(&self, date: NaiveDate, _position: &Position) -> SolarTimes {
            SolarTimes::new(
                date.and_time(self.sunrise).and_utc(),
                date.and_time(self.sunset).and_utc(),
            )
        }

        fn timezone(&self, _position: &Position) -> Tz {
            Tz::UTC
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, s).unwrap()
    }

    fn london() -> Position {
        Position::new(51.5, -0.12).unwrap()
    }

    #[test]
    fn test_format_examples() {
        assert_eq!(format_millis(3_661_000), "01:01:01");
        assert_eq!(format_millis(0), "00:00:00");
        assert_eq!(format_millis(90_000_000), "25:00:00");
        assert_eq!(format_millis(30 * 3_600_000), "30:00:00");
    }

    #[test]
    fn test_format_truncates_and_clamps() {
        assert_eq!(format_millis(59_999), "00:00:59");
        assert_eq!(format_millis(-5_000), "00:00:00");
        assert_eq!(format_countdown(Duration::seconds(-1)), "00:00:00");
        assert_eq!(format_countdown(Duration::milliseconds(3_599_999)), "00:59:59");
    }

    #[test]
    fn test_midday_counts_to_sunset() {
        let calc = DailyTimes::new((8, 0), (16, 0));
        let countdown = compute_next_event(at(12, 0, 0), &london(), &calc);

        assert!(countdown.is_day);
        assert_eq!(countdown.next.kind, EventKind::Sunset);
        assert_eq!(countdown.next.instant, at(16, 0, 0));
        assert_eq!(countdown.text(), "04:00:00");
    }

    #[test]
    fn test_early_morning_counts_to_todays_sunrise() {
        let calc = DailyTimes::new((8, 0), (16, 0));
        let countdown = compute_next_event(at(5, 30, 0), &london(), &calc);

        assert!(!countdown.is_day);
        assert_eq!(countdown.next.kind, EventKind::Sunrise);
        assert_eq!(countdown.next.instant, at(8, 0, 0));
        assert_eq!(countdown.text(), "02:30:00");
    }

    #[test]
    fn test_evening_rolls_to_tomorrows_sunrise() {
        let calc = DailyTimes::new((8, 0), (16, 0));
        let countdown = compute_next_event(at(20, 0, 0), &london(), &calc);

        assert!(!countdown.is_day);
        assert_eq!(countdown.next.kind, EventKind::Sunrise);
        assert_eq!(countdown.next.instant, at(8, 0, 0) + Duration::days(1));
        assert_eq!(countdown.text(), "12:00:00");
    }

    #[test]
    fn test_exactly_at_sunset_rolls_to_sunrise() {
        let calc = DailyTimes::new((8, 0), (16, 0));
        let countdown = compute_next_event(at(16, 0, 0), &london(), &calc);

        assert!(!countdown.is_day);
        assert_eq!(countdown.next.kind, EventKind::Sunrise);
        assert!(countdown.next.instant > at(16, 0, 0));
        assert_eq!(countdown.text(), "16:00:00");
    }

    #[test]
    fn test_exactly_at_sunrise_is_day() {
        let calc = DailyTimes::new((8, 0), (16, 0));
        let countdown = compute_next_event(at(8, 0, 0), &london(), &calc);

        assert!(countdown.is_day);
        assert_eq!(countdown.next.kind, EventKind::Sunset);
        assert_eq!(countdown.text(), "08:00:00");
    }

    #[test]
    fn test_one_second_before_midnight() {
        let calc = DailyTimes::new((8, 0), (16, 0));
        let countdown = compute_next_event(at(23, 59, 59), &london(), &calc);

        assert_eq!(countdown.next.kind, EventKind::Sunrise);
        assert_eq!(countdown.text(), "08:00:01");
    }

    /// Calculator whose events never move, so rollover can find nothing.
    struct Frozen(DateTime<Utc>);

    impl SolarCalculator for Frozen {
        fn solar_times(&self, _date: NaiveDate, _position: &Position) -> SolarTimes {
            SolarTimes::new(self.0, self.0)
        }

        fn timezone(&self, _position: &Position) -> Tz {
            Tz::UTC
        }
    }

    #[test]
    fn test_stuck_calculator_counts_to_zero() {
        let calc = Frozen(at(6, 0, 0));
        let countdown = compute_next_event(at(12, 0, 0), &london(), &calc);

        assert!(!countdown.is_day);
        assert_eq!(countdown.next.kind, EventKind::Sunrise);
        assert_eq!(countdown.text(), "00:00:00");
    }

    #[test]
    fn test_labels() {
        assert_eq!(EventKind::Sunrise.to_string(), "Sunrise");
        assert_eq!(EventKind::Sunset.label(), "Sunset");
    }
}
