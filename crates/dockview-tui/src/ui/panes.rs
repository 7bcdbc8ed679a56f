use super::*;
use crate::app::StatusKind;
use dockview_core::{DetailPane, LogPane};
use ratatui::widgets::{Paragraph, Wrap};

pub(super) fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let text: Text = match &app.details {
        DetailPane::Empty => Text::default(),
        DetailPane::Message(msg) => Text::from(msg.as_str()),
        DetailPane::Error(msg) => Text::styled(msg.as_str(), Style::default().fg(Color::Red)),
        DetailPane::Fields(fields) => fields
            .iter()
            .map(|f| {
                Line::from(vec![
                    Span::styled(format!("{}: ", f.label), Style::default().bold()),
                    Span::raw(f.value.as_str()),
                ])
            })
            .collect::<Vec<_>>()
            .into(),
    };

    let paragraph = Paragraph::new(text)
        .block(pane_block(
            " Container Details ".to_string(),
            is_focused(app, Focus::Details),
        ))
        .wrap(Wrap { trim: false })
        .scroll((app.details_scroll, 0));

    frame.render_widget(paragraph, area);
}

pub(super) fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.logs {
        LogPane::Empty => Text::default(),
        LogPane::Text(logs) => Text::from(logs.as_str()),
        LogPane::Error(msg) => Text::styled(msg.as_str(), Style::default().fg(Color::Red)),
    };

    let paragraph = Paragraph::new(text)
        .block(pane_block(
            format!(" Last {} Logs ", app.log_tail()),
            is_focused(app, Focus::Logs),
        ))
        .wrap(Wrap { trim: false })
        .scroll((app.logs_scroll, 0));

    frame.render_widget(paragraph, area);
}

pub(super) fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Line::styled(status.text(), Style::default().fg(color))
        }
        None => Line::default(),
    };

    let title = if app.is_refreshing() {
        " Status (loading…) "
    } else {
        " Status "
    };

    let paragraph = Paragraph::new(line).block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
