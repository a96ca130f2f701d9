//! Terminal surface drawn with crossterm.
//!
//! On a TTY the block is redrawn in place every tick, colored with a day
//! (yellow) or night (blue) palette. When stdout is redirected each render
//! becomes one plain line instead.

use anyhow::Result;
use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use std::io::{Stdout, Write, stdout};

use super::{Backgrounds, Surface};
use crate::state::DisplayState;

const DAY_COLOR: Color = Color::Yellow;
const NIGHT_COLOR: Color = Color::Blue;

/// Renders the countdown block to a terminal or plain writer.
pub struct TerminalSurface<W: Write> {
    out: W,
    backgrounds: Backgrounds,
    interactive: bool,
    drawn_lines: u16,
    last: Option<DisplayState>,
}

impl TerminalSurface<Stdout> {
    /// Surface on stdout, interactive when stdout is a terminal.
    pub fn stdout(backgrounds: Backgrounds) -> Self {
        let interactive = stdout().is_tty();
        Self::new(stdout(), backgrounds, interactive)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, backgrounds: Backgrounds, interactive: bool) -> Self {
        Self {
            out,
            backgrounds,
            interactive,
            drawn_lines: 0,
            last: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Erase the previously drawn block so the next one replaces it.
    fn clear_previous(&mut self) -> Result<()> {
        if self.drawn_lines > 0 {
            queue!(
                self.out,
                MoveUp(self.drawn_lines),
                MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
            self.drawn_lines = 0;
        }
        Ok(())
    }

    fn draw_block(&mut self, headline: &str, color: Color, details: &[String]) -> Result<()> {
        self.clear_previous()?;
        queue!(
            self.out,
            Print("┃\n┣ "),
            SetForegroundColor(color),
            Print(headline),
            ResetColor,
            Print("\n")
        )?;
        for line in details {
            queue!(self.out, Print(format!("┃   {line}\n")))?;
        }
        self.out.flush()?;
        self.drawn_lines = 2 + details.len() as u16;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render(&mut self, state: &DisplayState) -> Result<()> {
        if self.last.as_ref() == Some(state) {
            return Ok(());
        }

        let background = self.backgrounds.select(state.is_day).to_string();

        if self.interactive {
            let (icon, color, half) = if state.is_day {
                ("☀", DAY_COLOR, "day")
            } else {
                ("☾", NIGHT_COLOR, "night")
            };
            let headline = format!("{icon} {}", state.countdown_text);
            let details = [
                state.event_label.clone(),
                state.place_name.clone(),
                format!("Background: {half} ({background})"),
            ];
            self.draw_block(&headline, color, &details)?;
        } else {
            writeln!(
                self.out,
                "{} {} | {} | {}",
                state.countdown_text, state.event_label, state.place_name, background
            )?;
            self.out.flush()?;
        }

        self.last = Some(state.clone());
        Ok(())
    }

    fn show_status(&mut self, message: &str) -> Result<()> {
        self.last = None;
        if self.interactive {
            self.draw_block("--:--:--", Color::DarkGrey, &[message.to_string()])
        } else {
            writeln!(self.out, "{message}")?;
            self.out.flush()?;
            Ok(())
        }
    }
}
