//! Raw-mode and alternate-screen lifetime.

use std::io;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

/// Holds the terminal in raw mode on the alternate screen. Dropping it puts
/// the terminal back, including when setup fails partway through.
pub struct TerminalGuard<F: FnMut() = fn()> {
    restore: F,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        let guard = Self::with_restore(restore_terminal as fn());
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<F: FnMut()> TerminalGuard<F> {
    fn with_restore(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

// Errors are ignored: this also runs after a half-finished setup.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}
