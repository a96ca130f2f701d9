//! Help command implementation for daybreak.
//!
//! Shows brief usage for a single command, used when its arguments are wrong.

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "status" | "s" => {
            log_block_start!("Usage: daybreak status [--json] [--at <datetime>] [--no-lookup]")
        }
        "locate" | "l" => log_block_start!("Usage: daybreak locate"),
        "simulate" | "S" => log_block_start!("Usage: daybreak simulate <start> [multiplier]"),
        _ => log_block_start!("Usage: daybreak [OPTIONS] [COMMAND]"),
    }
}
