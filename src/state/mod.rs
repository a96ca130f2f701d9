//! Session and display state.
//!
//! - [`session`]: the explicit session context and its state machine
//! - [`display`]: the per-tick `DisplayState` shown by surfaces

pub mod display;
pub mod session;

pub use display::DisplayState;
pub use session::{AppState, Session, TransitionError};
