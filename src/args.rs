//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. Flags may appear anywhere on the
//! line; the first bare word selects a command.

use crate::common::constants::DEFAULT_SIMULATION_MULTIPLIER;
use crate::geo::Position;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the live countdown
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        coords: Option<Position>,
    },
    /// Compute and print one display state
    Status {
        debug_enabled: bool,
        config_dir: Option<String>,
        coords: Option<Position>,
        json: bool,
        at: Option<String>,
        lookup: bool,
    },
    /// Acquire the position once and print it with its place name
    Locate {
        debug_enabled: bool,
        config_dir: Option<String>,
        coords: Option<Position>,
    },
    /// Run the live countdown on a simulated clock
    Simulate {
        debug_enabled: bool,
        config_dir: Option<String>,
        coords: Option<Position>,
        start_time: String,
        multiplier: f64,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first element is the program name and is skipped. Version takes
    /// precedence over help, and help over everything else.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut config_dir: Option<String> = None;
        let mut coords: Option<Position> = None;
        let mut json = false;
        let mut at: Option<String> = None;
        let mut no_lookup = false;
        let mut command: Option<String> = None;
        let mut operands: Vec<String> = Vec::new();

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut iter = args_vec.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--no-lookup" => no_lookup = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) => config_dir = Some(dir.clone()),
                    None => {
                        log_warning!("Missing directory for --config");
                        unknown_arg_found = true;
                    }
                },
                "--coords" => match iter.next().map(|v| Position::parse_pair(v)) {
                    Some(Ok(position)) => coords = Some(position),
                    Some(Err(e)) => {
                        log_warning!("Invalid --coords value: {e}");
                        unknown_arg_found = true;
                    }
                    None => {
                        log_warning!("Missing LAT,LON for --coords");
                        unknown_arg_found = true;
                    }
                },
                "--at" => match iter.next() {
                    Some(when) => at = Some(when.clone()),
                    None => {
                        log_warning!("Missing datetime for --at");
                        unknown_arg_found = true;
                    }
                },
                flag if flag.starts_with('-') => {
                    log_warning!("Unknown option: {flag}");
                    unknown_arg_found = true;
                }
                word => {
                    if command.is_none() {
                        command = Some(word.to_string());
                    } else {
                        operands.push(word.to_string());
                    }
                }
            }
        }

        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if display_help || command.as_deref() == Some("help") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }
        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let status_only = json || at.is_some() || no_lookup;
        if status_only && command.as_deref() != Some("status") {
            log_warning!("--json, --at and --no-lookup only apply to the status command");
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let action = match command.as_deref() {
            None => CliAction::Run {
                debug_enabled,
                config_dir,
                coords,
            },
            Some("status" | "s") if operands.is_empty() => CliAction::Status {
                debug_enabled,
                config_dir,
                coords,
                json,
                at,
                lookup: !no_lookup,
            },
            Some("locate" | "l") if operands.is_empty() => CliAction::Locate {
                debug_enabled,
                config_dir,
                coords,
            },
            Some("simulate" | "S") => match parse_simulate_operands(&operands) {
                Some((start_time, multiplier)) => CliAction::Simulate {
                    debug_enabled,
                    config_dir,
                    coords,
                    start_time,
                    multiplier,
                },
                None => CliAction::ShowHelpDueToError,
            },
            Some(cmd @ ("status" | "s" | "locate" | "l")) => {
                log_warning!("'{cmd}' takes no arguments, got: {}", operands.join(" "));
                CliAction::ShowHelpDueToError
            }
            Some(other) => {
                log_warning!("Unknown command: {other}");
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// `simulate START [MULTIPLIER]`
fn parse_simulate_operands(operands: &[String]) -> Option<(String, f64)> {
    match operands {
        [start] => Some((start.clone(), DEFAULT_SIMULATION_MULTIPLIER)),
        [start, multiplier] => match multiplier.parse::<f64>() {
            Ok(m) if m.is_finite() && m > 0.0 => Some((start.clone(), m)),
            _ => {
                log_warning!("Invalid multiplier '{multiplier}'. Use a positive number");
                None
            }
        },
        [] => {
            log_warning!("Missing start time. Usage: daybreak simulate \"YYYY-MM-DD HH:MM:SS\" [multiplier]");
            None
        }
        _ => {
            log_warning!("Too many arguments for simulate");
            None
        }
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::common::logger::write_output(&format!("┗ {}\n", env!("CARGO_PKG_DESCRIPTION")));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("daybreak [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("    --coords <lat,lon> Use these coordinates instead of locating");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("(none)                 Live countdown to the next sunrise or sunset");
    log_indented!("status, s              Print the countdown once and exit");
    log_indented!("    -j, --json         Print as JSON");
    log_indented!("    --at <datetime>    Evaluate at \"YYYY-MM-DD HH:MM:SS\" (wall-clock time at the position)");
    log_indented!("    --no-lookup        Skip the place-name lookup");
    log_indented!("locate, l              Show the detected position and place name");
    log_indented!("simulate, S <start> [multiplier]");
    log_indented!("                       Live countdown on a simulated clock");
    log_indented!("                       (default multiplier: 60x)");
    log_end!();
}
