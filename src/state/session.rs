//! Explicit session context replacing ambient module state.
//!
//! A [`Session`] owns the captured position, the current place-name text, the
//! clock, the solar calculator, and the application state machine:
//!
//! ```text
//! Idle -> AwaitingLocation -> LocationDenied
//!                          -> LocationUnsupported
//!                          -> Running (self-loops once per tick)
//! ```
//!
//! No transition leads back to `AwaitingLocation`; a position is acquired at
//! most once per session.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::DisplayState;
use crate::common::constants::MESSAGE_LOCATING;
use crate::core::countdown::{Countdown, compute_next_event};
use crate::geo::{GeolocationError, Position, SolarCalculator};
use crate::time::Clock;

/// Whole-application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AppState {
    Idle,
    AwaitingLocation,
    LocationDenied,
    LocationUnsupported,
    Running,
}

impl AppState {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: AppState) -> bool {
        use AppState::*;
        matches!(
            (self, next),
            (Idle, AwaitingLocation)
                | (AwaitingLocation, LocationDenied)
                | (AwaitingLocation, LocationUnsupported)
                | (AwaitingLocation, Running)
        )
    }

    /// States the session never leaves.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppState::LocationDenied | AppState::LocationUnsupported | AppState::Running
        )
    }
}

/// An attempted state change the machine does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: AppState,
    pub to: AppState,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid session transition {:?} -> {:?}", self.from, self.to)
    }
}

impl std::error::Error for TransitionError {}

/// Countdown session context.
pub struct Session<C: SolarCalculator> {
    state: AppState,
    position: Option<Position>,
    place_name: String,
    calculator: C,
    clock: Arc<dyn Clock>,
}

impl<C: SolarCalculator> Session<C> {
    pub fn new(calculator: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: AppState::Idle,
            position: None,
            place_name: String::new(),
            calculator,
            clock,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Text currently shown in the place-name region.
    pub fn place_name(&self) -> &str {
        &self.place_name
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn transition(&mut self, next: AppState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }
        log_debug!("Session state: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// `Idle -> AwaitingLocation`.
    pub fn begin_locating(&mut self) -> Result<(), TransitionError> {
        self.transition(AppState::AwaitingLocation)?;
        self.place_name = MESSAGE_LOCATING.to_string();
        Ok(())
    }

    /// `AwaitingLocation -> Running` with the captured position.
    pub fn location_acquired(&mut self, position: Position) -> Result<(), TransitionError> {
        self.transition(AppState::Running)?;
        self.position = Some(position);
        Ok(())
    }

    /// `AwaitingLocation -> LocationUnsupported | LocationDenied`.
    ///
    /// Sets the user-facing message shown in place of the place name.
    pub fn location_failed(&mut self, error: &GeolocationError) -> Result<(), TransitionError> {
        let next = match error {
            GeolocationError::Unsupported => AppState::LocationUnsupported,
            _ => AppState::LocationDenied,
        };
        self.transition(next)?;
        self.place_name = error.user_message().to_string();
        Ok(())
    }

    /// Replace the place-name text (reverse geocoding result or fallback).
    ///
    /// Ignored unless the countdown is running.
    pub fn set_place_name(&mut self, name: impl Into<String>) {
        if self.state == AppState::Running {
            self.place_name = name.into();
        }
    }

    /// Evaluate the countdown at the clock's current instant.
    ///
    /// `None` until a position has been captured.
    pub fn countdown(&self) -> Option<Countdown> {
        let position = self.position?;
        Some(compute_next_event(
            self.clock.now(),
            &position,
            &self.calculator,
        ))
    }

    /// One tick: the display state to render, or `None` while not running.
    pub fn tick(&self) -> Option<DisplayState> {
        if self.state != AppState::Running {
            return None;
        }
        self.countdown()
            .map(|countdown| DisplayState::new(&countdown, &self.place_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::{MESSAGE_UNAVAILABLE, MESSAGE_UNSUPPORTED};
    use crate::geo::SolarTimes;
    use crate::time::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;

    struct EightToFour;

    impl SolarCalculator for EightToFour {
        fn solar_times(&self, date: NaiveDate, _position: &Position) -> SolarTimes {
            SolarTimes::new(
                date.and_hms_opt(8, 0, 0).unwrap().and_utc(),
                date.and_hms_opt(16, 0, 0).unwrap().and_utc(),
            )
        }

        fn timezone(&self, _position: &Position) -> Tz {
            Tz::UTC
        }
    }

    fn session() -> Session<EightToFour> {
        let noon = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        Session::new(EightToFour, Arc::new(FixedClock(noon)))
    }

    fn london() -> Position {
        Position::new(51.5, -0.12).unwrap()
    }

    #[test]
    fn test_tick_is_noop_without_position() {
        let mut session = session();
        assert_eq!(session.tick(), None);

        session.begin_locating().unwrap();
        assert_eq!(session.tick(), None);
        assert_eq!(session.place_name(), MESSAGE_LOCATING);
    }

    #[test]
    fn test_running_session_produces_display_state() {
        let mut session = session();
        session.begin_locating().unwrap();
        session.location_acquired(london()).unwrap();
        session.set_place_name("London");

        let state = session.tick().expect("running");
        assert_eq!(state.countdown_text, "04:00:00");
        assert_eq!(state.event_label, "Until Sunset");
        assert_eq!(state.place_name, "London");
        assert!(state.is_day);
    }

    #[test]
    fn test_denied_location_is_terminal() {
        let mut session = session();
        session.begin_locating().unwrap();
        session
            .location_failed(&GeolocationError::PermissionDenied)
            .unwrap();

        assert_eq!(session.state(), AppState::LocationDenied);
        assert_eq!(session.place_name(), MESSAGE_UNAVAILABLE);
        assert!(session.location_acquired(london()).is_err());
        assert!(session.begin_locating().is_err());
        assert_eq!(session.tick(), None);

        // Late place-name results do not overwrite the error message
        session.set_place_name("London");
        assert_eq!(session.place_name(), MESSAGE_UNAVAILABLE);
    }

    #[test]
    fn test_unsupported_location_message() {
        let mut session = session();
        session.begin_locating().unwrap();
        session
            .location_failed(&GeolocationError::Unsupported)
            .unwrap();

        assert_eq!(session.state(), AppState::LocationUnsupported);
        assert_eq!(session.place_name(), MESSAGE_UNSUPPORTED);
    }

    #[test]
    fn test_timeout_counts_as_unavailable() {
        let mut session = session();
        session.begin_locating().unwrap();
        session.location_failed(&GeolocationError::Timeout).unwrap();
        assert_eq!(session.state(), AppState::LocationDenied);
    }

    #[test]
    fn test_position_is_captured_once() {
        let mut session = session();
        session.begin_locating().unwrap();
        session.location_acquired(london()).unwrap();

        let other = Position::new(35.0, 139.0).unwrap();
        let err = session.location_acquired(other).unwrap_err();
        assert_eq!(err.from, AppState::Running);
        assert_eq!(session.position(), Some(london()));
    }

    #[test]
    fn test_transition_table() {
        use AppState::*;
        assert!(Idle.can_transition_to(AwaitingLocation));
        assert!(!Idle.can_transition_to(Running));
        assert!(!Running.can_transition_to(AwaitingLocation));
        assert!(!LocationDenied.can_transition_to(Running));
        assert!(Running.is_terminal());
        assert!(!AwaitingLocation.is_terminal());
    }
}
