//! Command-line command handlers for daybreak.
//!
//! One-shot commands (`status`, `locate`) and the `simulate` variant of the
//! live countdown. Each command lives in its own submodule.

pub mod help;
pub mod locate;
pub mod simulate;
pub mod status;

use anyhow::Result;

use crate::config::{self, Config};
use crate::geo::{GeolocationError, Position};

/// Load the configuration and apply the `--coords` override.
pub(crate) fn load_config(coords: Option<Position>) -> Result<Config> {
    let config = config::load()?;
    Ok(match coords {
        Some(position) => config.with_position(position),
        None => config,
    })
}

/// Turn a location failure into the error a one-shot command exits with.
pub(crate) fn location_failure(error: &GeolocationError) -> anyhow::Error {
    log_debug!("Location request failed: {error}");
    anyhow::anyhow!(error.user_message())
}
