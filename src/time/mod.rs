//! Time handling: clocks for real, fixed, and simulated operation.

pub mod source;

pub use source::{Clock, FixedClock, SimulatedClock, SystemClock};
