//! Core application logic: the countdown loop.
//!
//! [`Core`] owns the session, the output surface, and the ticker. Running it
//! walks the session through its state machine:
//!
//! 1. `Idle -> AwaitingLocation`, showing "Locating..."
//! 2. One-shot position request. Failure ends the run in `LocationDenied` or
//!    `LocationUnsupported` with the matching message on screen.
//! 3. `Running`: the place-name lookup is spawned in the background and the
//!    ticker drives one render per second until shutdown.
//!
//! All mutation happens on the loop's own task. Background work reports back
//! over channels, and a result arriving after shutdown is dropped unseen.

pub mod countdown;
pub mod ticker;

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::{
    common::constants::TICK_INTERVAL,
    display::Surface,
    geo::{
        Geolocator, PlaceNameResolver, Position, SolarCalculator, acquire_location,
        display::log_solar_times, resolve_place_name,
    },
    state::{AppState, Session},
};
use ticker::Ticker;

/// Drives one countdown session to completion.
pub struct Core<C: SolarCalculator, S: Surface> {
    session: Session<C>,
    surface: S,
    ticker: Ticker,
}

impl<C: SolarCalculator, S: Surface> Core<C, S> {
    pub fn new(session: Session<C>, surface: S) -> Self {
        Self {
            session,
            surface,
            ticker: Ticker::new(TICK_INTERVAL),
        }
    }

    /// Override the tick period (simulation and tests).
    pub fn with_tick_interval(mut self, period: Duration) -> Self {
        self.ticker = Ticker::new(period);
        self
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run until `shutdown` resolves or the location request fails.
    ///
    /// `resolver` is `None` when reverse geocoding is disabled; the place name
    /// then shows the rounded coordinates directly. Returns the state the
    /// session ended in.
    pub async fn run<G, R, F>(
        &mut self,
        locator: &G,
        resolver: Option<R>,
        shutdown: F,
    ) -> Result<AppState>
    where
        G: Geolocator,
        R: PlaceNameResolver + Send + Sync + 'static,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.session.begin_locating()?;
        self.surface.show_status(self.session.place_name())?;

        let located = tokio::select! {
            _ = &mut shutdown => {
                log_debug!("Shutdown requested while locating");
                return Ok(self.session.state());
            }
            result = acquire_location(locator) => result,
        };

        let position = match located {
            Ok(position) => position,
            Err(e) => {
                log_warning!("Location request failed: {e}");
                self.session.location_failed(&e)?;
                self.surface.show_status(self.session.place_name())?;
                return Ok(self.session.state());
            }
        };

        self.session.location_acquired(position)?;
        self.log_start(&position);

        let mut place_rx = match resolver {
            Some(resolver) => Some(spawn_place_lookup(resolver, position)),
            None => {
                self.session.set_place_name(position.format_coordinates());
                None
            }
        };

        let mut ticks = self.ticker.start();
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log_debug!("Shutdown requested");
                    break;
                }
                name = recv_place(&mut place_rx) => {
                    if let Some(name) = name {
                        self.session.set_place_name(name);
                        self.render()?;
                    }
                }
                tick = ticks.recv() => {
                    if tick.is_none() {
                        break;
                    }
                    self.render()?;
                }
            }
        }

        self.ticker.stop();
        Ok(self.session.state())
    }

    fn render(&mut self) -> Result<()> {
        if let Some(state) = self.session.tick() {
            self.surface.render(&state)?;
        }
        Ok(())
    }

    fn log_start(&self, position: &Position) {
        if !crate::common::logger::Log::is_debug() {
            return;
        }
        let calculator = self.session.calculator();
        let now = self.session.clock().now();
        let date = calculator.calendar_date(now, position);
        let times = calculator.solar_times(date, position);
        log_solar_times(position, calculator.timezone(position), &times);
    }
}

/// Spawn the one-shot place-name lookup.
///
/// The lookup always yields a string (fallback coordinates on failure). If
/// the receiver is gone by then, the send fails silently.
fn spawn_place_lookup<R>(resolver: R, position: Position) -> oneshot::Receiver<String>
where
    R: PlaceNameResolver + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let name = resolve_place_name(&resolver, position).await;
        let _ = tx.send(name);
    });
    rx
}

/// Await the pending place name, or park forever once it has arrived.
async fn recv_place(rx: &mut Option<oneshot::Receiver<String>>) -> Option<String> {
    match rx {
        Some(inner) => {
            let name = inner.await.ok();
            *rx = None;
            name
        }
        None => std::future::pending().await,
    }
}
