//! # Daybreak Library
//!
//! Internal library for the daybreak binary application
//!
//! This library exists to enable testing of the countdown internals and keep a
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Daybreak` struct runs the live countdown with resource management
//! - **Core Logic**: `core` holds the countdown engine, the ticker, and the event loop
//! - **Session**: `state` holds the explicit session context and the per-tick display state
//! - **Geographic**: `geo` module for positions, solar times, geolocation, and reverse geocoding
//! - **Presentation**: `display` module with the terminal surface and background selection
//! - **Configuration**: `config` module for TOML-based settings
//! - **Commands**: `commands` module for `status`, `locate`, and `simulate`
//! - **Infrastructure**: clocks, shutdown signals, logging, and utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

// Public API modules
pub mod args;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod geo;
pub mod io;
pub mod state;
pub mod time;

#[cfg(any(test, feature = "testing-support"))]
pub mod testing;

mod daybreak;

// Re-export for binary
pub use daybreak::Daybreak;
