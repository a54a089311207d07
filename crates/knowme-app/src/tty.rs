//! Raw-mode screen lifecycle.
//!
//! The screen is restored on normal exit (via [`Screen`]'s `Drop`) and on
//! panic (via [`install_panic_hook`]).

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Guard for the alternate screen. Dropping it restores the terminal.
pub struct Screen {
    out: Stdout,
}

impl Screen {
    /// Enter raw mode and the alternate screen with bracketed paste on.
    ///
    /// Call [`install_panic_hook`] first.
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, EnableBracketedPaste, Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    pub fn size() -> Result<(u16, u16)> {
        crossterm::terminal::size().context("Failed to query terminal size")
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            log::warn!("terminal restore failed: {e}");
        }
    }
}

/// Undo everything [`Screen::enter`] did. Safe to call more than once.
pub fn restore() -> Result<()> {
    let _ = execute!(io::stdout(), DisableBracketedPaste, Show);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

pub fn install_panic_hook() {
    let original = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        original(info);
    }));
}
