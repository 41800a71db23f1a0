//! Application state and TUI event loop for the region sales dashboard.
//!
//! [`App`] owns the theme, the region list cursor and the last received
//! snapshot. Key presses move the cursor; every cursor move is forwarded to
//! the selection session, whose snapshots arrive back on an `mpsc` channel.

use std::io;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;

use sales_runtime::session::{DashboardSnapshot, SessionHandle};

use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

// ── KeyAction ─────────────────────────────────────────────────────────────────

/// Outcome of a single key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing to do.
    None,
    /// Selection changed to the given region (or cleared).
    Select(Option<String>),
    /// Leave the event loop.
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Top-level TUI application state.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Selectable regions, sorted.
    pub regions: Vec<String>,
    /// Highlighted index into `regions`; `None` when nothing is selected.
    pub cursor: Option<usize>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Most recent snapshot, `None` until the first one arrives.
    pub last_snapshot: Option<DashboardSnapshot>,
}

impl App {
    /// Construct the application with `initial` highlighted when it is one
    /// of `regions`.
    pub fn new(theme_name: &str, regions: Vec<String>, initial: Option<&str>) -> Self {
        let cursor = initial.and_then(|name| regions.iter().position(|r| r == name));
        Self {
            theme: Theme::from_name(theme_name),
            regions,
            cursor,
            should_quit: false,
            last_snapshot: None,
        }
    }

    /// Region under the cursor.
    pub fn selected_region(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.regions.get(i))
            .map(String::as_str)
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the terminal
    /// loop stays on the current thread while snapshots arrive on `rx` and
    /// are drained with `try_recv`.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<DashboardSnapshot>,
        session: &SessionHandle,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard::new(restore_terminal);
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => match self.handle_key(key) {
                        KeyAction::Quit => break Ok(()),
                        KeyAction::Select(region) => {
                            tracing::debug!(region = ?region, "selection changed");
                            session.select(region);
                        }
                        KeyAction::None => {}
                    },
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            loop {
                match rx.try_recv() {
                    Ok(snapshot) => self.apply_snapshot(snapshot),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore the terminal even when the loop failed. The guard covers
        // the future being dropped before this point.
        guard.restore()?;

        result
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Translate a key press into a cursor move and the resulting action.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        let last = self.regions.len().checked_sub(1);
        let next = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
            KeyCode::Char('c') | KeyCode::Esc => None,
            KeyCode::Up | KeyCode::Char('k') => match self.cursor {
                Some(i) => Some(i.saturating_sub(1)),
                None => last,
            },
            KeyCode::Down | KeyCode::Char('j') => match (self.cursor, last) {
                (Some(i), Some(last)) => Some((i + 1).min(last)),
                (None, Some(_)) => Some(0),
                (_, None) => None,
            },
            KeyCode::Home => last.map(|_| 0),
            KeyCode::End => last,
            _ => return KeyAction::None,
        };

        if next == self.cursor {
            return KeyAction::None;
        }
        self.cursor = next;
        KeyAction::Select(self.selected_region().map(str::to_string))
    }

    /// Store an incoming snapshot for rendering.
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.last_snapshot = Some(snapshot);
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        match self.last_snapshot {
            Some(ref snapshot) => {
                let data = DashboardViewData {
                    regions: &self.regions,
                    cursor: self.cursor,
                    selection: snapshot.selection.as_deref(),
                    views: &snapshot.views,
                };
                dashboard_view::render_dashboard(frame, &data, &self.theme);
            }
            None => dashboard_view::render_loading(frame, &self.theme),
        }
    }
}

// ── TerminalGuard ─────────────────────────────────────────────────────────────

/// Runs a terminal restore exactly once: on [`TerminalGuard::restore`] or,
/// failing that, on drop.
pub struct TerminalGuard<F>
where
    F: FnMut() -> io::Result<()>,
{
    restore: F,
    restored: bool,
}

impl<F> TerminalGuard<F>
where
    F: FnMut() -> io::Result<()>,
{
    pub fn new(restore: F) -> Self {
        Self {
            restore,
            restored: false,
        }
    }

    /// Restore now and report any error. Later calls are no-ops.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        (self.restore)()
    }
}

impl<F> Drop for TerminalGuard<F>
where
    F: FnMut() -> io::Result<()>,
{
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Leave raw mode and the alternate screen, and show the cursor.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
