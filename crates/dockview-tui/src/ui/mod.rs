//! UI rendering for the TUI application

mod containers;
mod panes;

use crate::app::{App, Focus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use containers::*;
use panes::*;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(3, 7), Constraint::Ratio(4, 7)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Containers table
            Constraint::Length(3), // Status line
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(columns[1]);

    draw_containers(frame, app, left[0]);
    draw_status(frame, app, left[1]);
    draw_details(frame, app, right[0]);
    draw_logs(frame, app, right[1]);
}

/// Bordered block, highlighted when it holds keyboard focus
fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

fn is_focused(app: &App, focus: Focus) -> bool {
    app.focus == focus
}
