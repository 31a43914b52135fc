//! Terminal console: pages, the search palette overlay and the event loop.

pub mod app;
pub mod colors;
pub mod pages;
pub mod table;
pub mod ui;

pub use app::App;

use crate::config::AppConfig;
use crate::error::{Result, SentinelError};
use crate::model::Dataset;
use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal, Stdout};
use std::panic;
use std::sync::{Arc, Once};

static PANIC_HOOK: Once = Once::new();

fn restore_terminal(stdout: &mut impl io::Write) {
    let _ = execute!(
        stdout,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen,
        crossterm::cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

/// Release builds abort on panic, so Drop never runs there.
/// Put the terminal back before the previous hook prints the message.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal(&mut io::stdout());
            tracing::error!(target: "tui", "panic: {}", info);
            previous(info);
        }));
    });
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
/// Dropping it hands the terminal back on every exit path.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(SentinelError::Terminal("stdout is not a terminal".into()));
        }
        install_panic_hook();

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }

        // From here on Drop restores everything.
        let mut session = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
        };
        session.terminal.clear()?;
        tracing::debug!(target: "tui", "terminal acquired");
        Ok(session)
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
        tracing::debug!(target: "tui", "terminal released");
    }
}

/// Run the interactive console until the user quits
pub fn run(config: AppConfig, data: Arc<Dataset>) -> Result<()> {
    let mut app = App::new(config, data);
    let mut session = TerminalSession::enter()?;
    tracing::info!(target: "tui", "console started");
    let result = app.run(session.terminal());
    drop(session);
    tracing::info!(target: "tui", ok = result.is_ok(), "console stopped");
    result
}
