//! Structured logging system with visual formatting.
//!
//! This module provides the box-drawing log style used throughout daybreak.
//! Every macro funnels into [`Log::emit`], which picks the line decoration for
//! the requested [`Line`] kind and routes the result through [`write_output`].
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: opens a new conceptual block (`┃` spacer, then `┣ message`).
//! - **`log_decorated!`**: continues a block (`┣ message`).
//! - **`log_indented!`**: nested details (`┃   message`).
//! - **`log_pipe!`**: a lone `┃` used before semantic messages that start a block.
//! - **`log_version!`** / **`log_end!`**: header and termination marker.
//! - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`, `log_critical!`**:
//!   semantic messages with a colored `[LEVEL]` tag.
//! - **`log_error_exit!`**: closes the log with an error (`┗[ERROR] message`).
//!
//! `log_debug!` only prints once [`Log::set_debug`] has been switched on
//! (the `--debug` flag), so detailed diagnostics cost nothing by default.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Line decorations understood by [`Log::emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Decorated,
    Indented,
    Pipe,
    BlockStart,
    Version,
    End,
    Info,
    Warning,
    Error,
    ErrorExit,
    Debug,
    Critical,
}

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    ///
    /// Used by `status --json` so that stdout only carries the JSON document.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Format a single log line without writing it.
    pub fn format_line(line: Line, message: &str) -> String {
        match line {
            Line::Decorated => format!("┣ {message}\n"),
            Line::Indented => format!("┃   {message}\n"),
            Line::Pipe => "┃\n".to_string(),
            Line::BlockStart => format!("┃\n┣ {message}\n"),
            Line::Version => format!("┏ daybreak v{} ━━╸\n", env!("CARGO_PKG_VERSION")),
            Line::End => "╹\n".to_string(),
            Line::Info => format!("┣[\x1b[32mINFO\x1b[0m] {message}\n"),
            Line::Warning => format!("┣[\x1b[33mWARNING\x1b[0m] {message}\n"),
            Line::Error => format!("┣[\x1b[31mERROR\x1b[0m] {message}\n"),
            Line::ErrorExit => format!("┃\n┗[\x1b[31mERROR\x1b[0m] {message}\n"),
            Line::Debug => format!("┣[\x1b[32mDEBUG\x1b[0m] {message}\n"),
            Line::Critical => format!("┣[\x1b[31mCRITICAL\x1b[0m] {message}\n"),
        }
    }

    /// Write one decorated line if logging is enabled.
    pub fn emit(line: Line, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        if line == Line::Debug && !Self::is_debug() {
            return;
        }
        write_output(&Self::format_line(line, message));
    }
}

/// Write already formatted text to stdout and flush immediately.
///
/// The live countdown redraws in place, so log lines must never sit in the
/// stdout buffer behind a cursor movement.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Decorated, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Decorated, &($expr).to_string())
    };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Indented, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Indented, &($expr).to_string())
    };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Pipe, "")
    };
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::BlockStart, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::BlockStart, &($expr).to_string())
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Version, "")
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::End, "")
    };
}

/// Log a warning message with pipe prefix and yellow-colored tag.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Warning, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Warning, &($expr).to_string())
    };
}

/// Log an error message with pipe prefix and red-colored tag.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Error, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Error, &($expr).to_string())
    };
}

/// Log an error that terminates the current flow (`┗[ERROR]`).
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::ErrorExit, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::ErrorExit, &($expr).to_string())
    };
}

/// Log an informational message with pipe prefix and green-colored tag.
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Info, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Info, &($expr).to_string())
    };
}

/// Log a debug message. Silent unless debug output was enabled.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Debug, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Debug, &($expr).to_string())
    };
}

/// Log a critical message with pipe prefix and red-colored tag.
#[macro_export]
macro_rules! log_critical {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Critical, &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit($crate::common::logger::Line::Critical, &($expr).to_string())
    };
}
