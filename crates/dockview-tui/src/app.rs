//! Main TUI application state and logic

use crate::event::{Event, EventHandler};
use crate::ui;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use dockview_core::format::status_clock;
use dockview_core::{
    ContainerSummary, CoreError, Dashboard, DetailPane, LogPane, Selection, NO_CONTAINERS,
};
use ratatui::prelude::*;
use ratatui::widgets::TableState;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::instrument::WithSubscriber;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Lines moved by PageUp/PageDown in a text pane
const PAGE_SIZE: u16 = 10;

/// Which region receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Details,
    Logs,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Table => Focus::Details,
            Focus::Details => Focus::Logs,
            Focus::Logs => Focus::Table,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Table => Focus::Logs,
            Focus::Details => Focus::Table,
            Focus::Logs => Focus::Details,
        }
    }
}

/// What started a refresh; only changes the wording of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The one-line status box
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub at: DateTime<Local>,
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    fn now(kind: StatusKind, message: String) -> Self {
        Self {
            at: Local::now(),
            kind,
            message,
        }
    }

    /// `HH:MM:SS message`
    pub fn text(&self) -> String {
        format!("{} {}", status_clock(self.at), self.message)
    }
}

/// Completed background requests, delivered back to the UI loop
#[derive(Debug)]
pub enum AppMessage {
    Refreshed {
        seq: u64,
        trigger: RefreshTrigger,
        result: Result<Vec<ContainerSummary>, CoreError>,
    },
    Shown {
        seq: u64,
        selection: Selection,
    },
}

/// Application state
pub struct App {
    /// Daemon context shared with background requests
    dashboard: Dashboard,
    /// Rows of the current list, replaced wholesale on every refresh
    pub containers: Vec<ContainerSummary>,
    /// Table selection; indexes `containers`
    pub table_state: TableState,
    pub details: DetailPane,
    pub logs: LogPane,
    pub status: Option<StatusLine>,
    pub focus: Focus,
    pub details_scroll: u16,
    pub logs_scroll: u16,
    /// Should quit
    pub should_quit: bool,
    tx: mpsc::UnboundedSender<AppMessage>,
    rx: mpsc::UnboundedReceiver<AppMessage>,
    /// Spawned requests whose message has not been applied yet
    in_flight: usize,
    /// Sequence number of the newest refresh request
    refresh_seq: u64,
    /// Sequence number of the newest show request
    show_seq: u64,
    /// Set while the newest refresh is outstanding
    refreshing: bool,
}

impl App {
    /// Create a new application; nothing is fetched until a refresh is requested
    pub fn new(dashboard: Dashboard) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dashboard,
            containers: Vec::new(),
            table_state: TableState::default(),
            details: DetailPane::Empty,
            logs: LogPane::Empty,
            status: None,
            focus: Focus::Table,
            details_scroll: 0,
            logs_scroll: 0,
            should_quit: false,
            tx,
            rx,
            in_flight: 0,
            refresh_seq: 0,
            show_seq: 0,
            refreshing: false,
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> AppResult<()> {
        let mut events = EventHandler::new(tick_rate);
        self.request_refresh(RefreshTrigger::Startup);

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            tokio::select! {
                event = events.next() => {
                    if let Some(e) = event {
                        self.handle_event(e);
                    }
                }
                message = self.rx.recv() => {
                    if let Some(message) = message {
                        self.receive(message);
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle an event
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key.code, key.modifiers),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Redraw happens on every loop iteration
            Event::Tick | Event::Resize(_, _) => {}
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::F(5) => {
                self.request_refresh(RefreshTrigger::User);
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
            }
            KeyCode::Enter => {
                if let Some(index) = self.selected() {
                    self.show_row(index);
                }
            }
            _ => match self.focus {
                Focus::Table => self.handle_table_key(code),
                Focus::Details | Focus::Logs => self.handle_scroll_key(code),
            },
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => {
                if !self.containers.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::Char('G') | KeyCode::End => {
                if !self.containers.is_empty() {
                    self.table_state.select(Some(self.containers.len() - 1));
                }
            }
            _ => {}
        }
    }

    fn handle_scroll_key(&mut self, code: KeyCode) {
        let (scroll, max) = match self.focus {
            Focus::Details => (
                &mut self.details_scroll,
                line_count(&self.details.plain_text()),
            ),
            Focus::Logs => (&mut self.logs_scroll, line_count(&self.logs.plain_text())),
            Focus::Table => return,
        };
        let max = max.saturating_sub(1);

        *scroll = match code {
            KeyCode::Char('j') | KeyCode::Down => scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => scroll.saturating_sub(1),
            KeyCode::PageDown => scroll.saturating_add(PAGE_SIZE),
            KeyCode::PageUp => scroll.saturating_sub(PAGE_SIZE),
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => max,
            _ => *scroll,
        }
        .min(max);
    }

    /// Mouse wheel moves the table selection
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_prev(),
            _ => {}
        }
    }

    fn select_next(&mut self) {
        if self.containers.is_empty() {
            return;
        }
        let last = self.containers.len() - 1;
        let next = self.selected().map_or(0, |i| (i + 1).min(last));
        self.table_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.containers.is_empty() {
            return;
        }
        let prev = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    /// Selected row, only if it still exists in the current list
    pub fn selected(&self) -> Option<usize> {
        self.table_state
            .selected()
            .filter(|&i| i < self.containers.len())
    }

    /// Get the currently selected container
    pub fn selected_container(&self) -> Option<&ContainerSummary> {
        self.selected().and_then(|i| self.containers.get(i))
    }

    /// Whether the newest refresh is still outstanding
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Trailing log line count, for the logs pane title
    pub fn log_tail(&self) -> u64 {
        self.dashboard.log_tail()
    }

    /// Start a list request in the background
    pub fn request_refresh(&mut self, trigger: RefreshTrigger) {
        self.refresh_seq += 1;
        self.refreshing = true;
        let seq = self.refresh_seq;
        let dashboard = self.dashboard.clone();
        let tx = self.tx.clone();

        self.in_flight += 1;
        // Worker threads would otherwise log through the global subscriber
        tokio::spawn(
            async move {
                let result = dashboard.refresh().await;
                let _ = tx.send(AppMessage::Refreshed {
                    seq,
                    trigger,
                    result,
                });
            }
            .with_current_subscriber(),
        );
    }

    /// Start detail and log requests for a row of the current list
    pub fn show_row(&mut self, index: usize) {
        let Some(summary) = self.containers.get(index).cloned() else {
            tracing::debug!("Ignoring show for row {} outside the list", index);
            return;
        };

        self.show_seq += 1;
        let seq = self.show_seq;
        let dashboard = self.dashboard.clone();
        let tx = self.tx.clone();

        self.in_flight += 1;
        tokio::spawn(
            async move {
                let selection = dashboard.show(&summary).await;
                let _ = tx.send(AppMessage::Shown { seq, selection });
            }
            .with_current_subscriber(),
        );
    }

    fn receive(&mut self, message: AppMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.apply(message);
    }

    /// Apply a finished request. Results of superseded requests are dropped.
    pub fn apply(&mut self, message: AppMessage) {
        match message {
            AppMessage::Refreshed {
                seq,
                trigger,
                result,
            } => {
                if seq != self.refresh_seq {
                    tracing::debug!("Dropping stale refresh #{}", seq);
                    return;
                }
                self.refreshing = false;
                match result {
                    Ok(rows) => self.replace_containers(rows),
                    Err(e) => {
                        let prefix = match trigger {
                            RefreshTrigger::Startup => "Error loading containers",
                            RefreshTrigger::User => "Refresh error",
                        };
                        self.status = Some(StatusLine::now(
                            StatusKind::Error,
                            format!("{}: {}", prefix, e),
                        ));
                    }
                }
            }
            AppMessage::Shown { seq, selection } => {
                if seq != self.show_seq {
                    tracing::debug!("Dropping stale selection #{}", seq);
                    return;
                }
                self.details = selection.detail;
                self.logs = selection.logs;
                self.details_scroll = 0;
                self.logs_scroll = 0;
            }
        }
    }

    fn replace_containers(&mut self, rows: Vec<ContainerSummary>) {
        self.containers = rows;
        self.status = Some(StatusLine::now(
            StatusKind::Success,
            format!("Refreshed. {} containers.", self.containers.len()),
        ));

        if self.containers.is_empty() {
            self.table_state.select(None);
            // Anything still loading belongs to a row that no longer exists
            self.show_seq += 1;
            self.details = DetailPane::Message(NO_CONTAINERS.to_string());
            self.logs = LogPane::Empty;
            self.details_scroll = 0;
            self.logs_scroll = 0;
        } else {
            self.table_state.select(Some(0));
            self.show_row(0);
        }
    }

    /// Apply results until no request is outstanding
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(message) => self.receive(message),
                None => break,
            }
        }
    }

    /// Press a key and wait for any requests it started
    pub async fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> AppResult<()> {
        self.handle_key(code, modifiers);
        self.settle().await;
        Ok(())
    }
}

fn line_count(text: &str) -> u16 {
    u16::try_from(text.lines().count()).unwrap_or(u16::MAX)
}
