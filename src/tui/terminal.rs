//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal, Stdout};
use std::panic;
use std::time::Instant;
use url::Url;

use crate::config::Settings;
use crate::error::OnboardError;
use crate::store::FormStore;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(OnboardError::Tui(
            "stdout is not a terminal; use `onboard prompt` instead".into(),
        )
        .into());
    }

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

/// Run the wizard until the user quits or the redirect fires
///
/// Returns the redirect URL when the wizard completed.
pub fn run_tui(settings: Settings, store: FormStore) -> Result<Option<Url>> {
    let mut terminal = init_terminal()?;
    let mut app = App::new(settings, store);
    tracing::info!(session = %app.session_id, "tui wizard started");

    let events = EventHandler::default();
    let outcome = event_loop(&mut terminal, &mut app, &events);

    // Restore even when the loop failed
    restore_terminal()?;
    outcome?;

    Ok(app.redirect.take())
}

fn event_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|frame| {
            super::views::render(frame, app, now);
        })?;

        handle_event(app, events.next()?)?;

        if app.should_quit {
            return Ok(());
        }
    }
}
