//! Shared utilities: terminal management and path display helpers.

use anyhow::Result;
use crossterm::{cursor, execute, tty::IsTty};
use std::io::stdout;
use std::path::Path;

/// RAII guard that hides the cursor while the live countdown is drawn.
///
/// Does nothing when stdout is not a terminal (pipes, service managers), so
/// construction never fails in headless environments.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        let active = stdout().is_tty();
        if active {
            execute!(stdout(), cursor::Hide)?;
        }
        Ok(Self { active })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(stdout(), cursor::Show);
        }
    }
}

/// Replace the home directory prefix with `~` for display.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}
