//! Application coordinator that manages the complete lifecycle of daybreak.
//!
//! This module acquires resources and hands them to [`Core`]:
//! - Terminal setup with RAII guards
//! - Configuration loading and the `--coords` override
//! - HTTP client, location provider, and place-name resolver
//! - Shutdown signal handling
//!
//! The `Daybreak` struct uses a builder pattern to support different contexts:
//! - Normal startup: `Daybreak::new(debug_enabled).run()`
//! - Simulation: `Daybreak::new(debug_enabled).with_clock(clock).without_headers().run()`

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::{
    common::utils::{TerminalGuard, private_path},
    config::{self, Config},
    core::Core,
    display::TerminalSurface,
    geo::{AstronomicalCalculator, Position, build_lookups},
    io::signals::wait_for_shutdown,
    state::{AppState, Session},
    time::{Clock, SystemClock},
};

/// Builder for configuring and running the countdown.
///
/// # Examples
///
/// ```no_run
/// use daybreak::Daybreak;
///
/// # async fn run() -> anyhow::Result<()> {
/// // Normal application startup
/// Daybreak::new(false).run().await?;
/// # Ok(())
/// # }
/// ```
pub struct Daybreak {
    debug_enabled: bool,
    show_headers: bool,
    clock: Arc<dyn Clock>,
    position: Option<Position>,
}

impl Daybreak {
    /// Create a new runner with defaults matching a normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
            clock: Arc::new(SystemClock),
            position: None,
        }
    }

    /// Use a different time source (simulation)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the configured coordinates
    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Skip the version header
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Run until interrupted or until the location request fails.
    ///
    /// Returns the state the session ended in so the caller can pick an exit
    /// code.
    pub async fn run(self) -> Result<AppState> {
        crate::common::logger::Log::set_debug(self.debug_enabled);

        if self.show_headers {
            log_version!();
        }

        // Restores the cursor on every exit path
        let _term = TerminalGuard::new().context("failed to initialize terminal features")?;

        let mut config = config::load()?;
        if let Some(position) = self.position {
            config = config.with_position(position);
        }

        if self.debug_enabled {
            let path = config::get_config_path()?;
            log_block_start!("Configuration file: {}", private_path(&path));
            config.log_config();
        }

        let state = run_with_config(&config, self.clock).await?;

        match state {
            AppState::Running | AppState::AwaitingLocation => log_block_start!("Goodbye"),
            AppState::LocationDenied | AppState::LocationUnsupported => {
                log_pipe!();
                log_error!("Countdown unavailable without a location");
            }
            AppState::Idle => {}
        }
        log_end!();

        Ok(state)
    }
}

/// Wire the configured services into a session and run it on the terminal.
async fn run_with_config(config: &Config, clock: Arc<dyn Clock>) -> Result<AppState> {
    let (locator, resolver) = build_lookups(config)?;

    let session = Session::new(AstronomicalCalculator, clock);
    // Debug lines would land inside the redrawn block, so fall back to
    // one line per tick
    let surface = if crate::common::logger::Log::is_debug() {
        TerminalSurface::new(std::io::stdout(), config.backgrounds(), false)
    } else {
        TerminalSurface::stdout(config.backgrounds())
    };
    let mut core = Core::new(session, surface);

    let shutdown = async {
        wait_for_shutdown().await;
    };
    core.run(&locator, resolver, shutdown).await
}
