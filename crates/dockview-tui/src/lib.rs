//! TUI application for dockview
//!
//! Built with Ratatui. Requests to the daemon run in background tasks so the
//! interface keeps drawing while a call is pending.

pub mod app;
mod event;
pub mod ui;

pub use app::{
    App, AppError, AppMessage, AppResult, Focus, RefreshTrigger, StatusKind, StatusLine,
};
pub use event::{Event, EventHandler};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dockview_core::Dashboard;
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;

/// How the terminal session is run
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Redraw interval when no input arrives
    pub tick_rate: Duration,
    /// Drop log events while the TUI owns the terminal
    pub silence_tracing: bool,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            silence_tracing: true,
        }
    }
}

/// Route this thread's log events, and those of requests the app spawns
/// from it, to a subscriber that drops them. Dropping the guard restores the
/// previous subscriber.
pub fn silence_tracing() -> DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::registry().with(tracing_subscriber::layer::Identity::new()),
    )
}

/// Run the TUI application
pub async fn run(dashboard: Dashboard, options: TuiOptions) -> AppResult<()> {
    // Log lines written to stderr would corrupt the display
    let _guard = options.silence_tracing.then(silence_tracing);

    enable_raw_mode()?;
    let mut terminal = setup_or_restore(enter_terminal, leave_terminal)?;

    let mut app = App::new(dashboard);
    let res = app.run(&mut terminal, options.tick_rate).await;

    leave_terminal()?;
    terminal.show_cursor()?;

    res
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Run `setup`; if it fails, undo what was already done before returning the error
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup().inspect_err(|e| {
        tracing::debug!("Terminal setup failed: {}", e);
        let _ = restore();
    })
}
