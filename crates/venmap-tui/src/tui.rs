//! Terminal session guard.
//!
//! Owns raw mode, the alternate screen, and mouse capture. All restoration
//! goes through [`restore`] so the normal exit path, `Drop`, and the panic
//! hook leave the terminal usable no matter how the app ends.

use std::io::{Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    cursor, execute,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Backend = CrosstermBackend<Stdout>;

/// Active terminal session. Raw mode and the alternate screen are held for
/// the lifetime of this value; `Drop` gives them back.
pub struct Tui {
    terminal: Terminal<Backend>,
}

impl Tui {
    /// Build the ratatui terminal. The screen is untouched until [`Tui::enter`].
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout()))?,
        })
    }

    /// Switch into TUI mode and clear the screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Current terminal dimensions as (cols, rows).
    pub fn size(&self) -> Result<(u16, u16)> {
        let area = self.terminal.size()?;
        Ok((area.width, area.height))
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore();
    }
}

/// Put the terminal back the way we found it.
///
/// Each step is attempted even if an earlier one fails; a half-restored
/// terminal is still better than none.
pub fn restore() {
    let _ = execute!(stdout(), cursor::Show);
    let _ = execute!(stdout(), DisableMouseCapture);
    let _ = execute!(stdout(), LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Install color-eyre report and panic hooks that run [`restore`] first,
/// so a panic never prints into the alternate screen. Call before
/// [`Tui::enter`]; a failure during setup then still lands on a sane
/// terminal.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();

    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        panic_hook(info);
    }));

    Ok(())
}
