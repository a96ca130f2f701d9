//! Main application entry point and command dispatch.
//!
//! Parses the command line, applies the global `--config` and `--debug`
//! settings, and hands off to the library: [`Daybreak`] for the live
//! countdown, or one of the handlers in `commands`.

use anyhow::Result;

use daybreak::{
    Daybreak,
    args::{self, CliAction, ParsedArgs},
    commands,
    common::{
        constants::{EXIT_FAILURE, EXIT_SUCCESS},
        logger::Log,
    },
    config, log_error_exit,
    state::AppState,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match dispatch(ParsedArgs::from_env().action).await {
        Ok(code) => code,
        Err(e) => {
            // Re-enable in case `status --json` silenced output
            Log::set_enabled(true);
            log_error_exit!("{e:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

async fn dispatch(action: CliAction) -> Result<i32> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(EXIT_FAILURE)
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            coords,
        } => {
            config::set_config_dir(config_dir)?;
            let state = Daybreak::new(debug_enabled).with_position(coords).run().await?;
            Ok(exit_code_for(state))
        }
        CliAction::Status {
            debug_enabled,
            config_dir,
            coords,
            json,
            at,
            lookup,
        } => {
            Log::set_debug(debug_enabled);
            config::set_config_dir(config_dir)?;
            commands::status::handle_status_command(json, at.as_deref(), lookup, coords).await?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Locate {
            debug_enabled,
            config_dir,
            coords,
        } => {
            Log::set_debug(debug_enabled);
            config::set_config_dir(config_dir)?;
            commands::locate::handle_locate_command(coords).await?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Simulate {
            debug_enabled,
            config_dir,
            coords,
            start_time,
            multiplier,
        } => {
            config::set_config_dir(config_dir)?;
            let state = commands::simulate::handle_simulate_command(
                &start_time,
                multiplier,
                coords,
                debug_enabled,
            )
            .await?;
            Ok(exit_code_for(state))
        }
    }
}

/// The live view fails only when it never got a position.
fn exit_code_for(state: AppState) -> i32 {
    match state {
        AppState::LocationDenied | AppState::LocationUnsupported => EXIT_FAILURE,
        _ => EXIT_SUCCESS,
    }
}
