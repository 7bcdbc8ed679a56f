use super::*;
use dockview_core::ContainerSummary;
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Cell, Row, Table};

const HEADERS: [&str; 5] = ["Name", "Image", "State", "Status", "Ports"];

const KEY_HINTS: &str = " ↑↓ select · Enter show · r refresh · Tab focus · q quit ";

pub(super) fn draw_containers(frame: &mut Frame, app: &mut App, area: Rect) {
    let header = Row::new(HEADERS.iter().map(|h| {
        Cell::from(Line::from(*h).alignment(Alignment::Center))
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .containers
        .iter()
        .map(|container| {
            let state_color = if container.is_running() {
                Color::Green
            } else {
                Color::DarkGray
            };

            Row::new(vec![
                Cell::from(container.name.clone()).style(Style::default().bold()),
                Cell::from(container.image.clone()),
                Cell::from(container.state.clone()).style(Style::default().fg(state_color)),
                Cell::from(container.status.clone()),
                Cell::from(container.ports.clone()),
            ])
        })
        .collect();

    let widths = column_widths(&app.containers);

    let block = pane_block(" Docker Containers ".to_string(), is_focused(app, Focus::Table))
        .title(Title::from(KEY_HINTS).position(Position::Bottom));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Each column as wide as its widest cell; Ports takes whatever is left
fn column_widths(containers: &[ContainerSummary]) -> [Constraint; 5] {
    let mut widths = HEADERS.map(|h| h.chars().count());

    for c in containers {
        let cells = [&c.name, &c.image, &c.state, &c.status, &c.ports];
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let len = |w: usize| u16::try_from(w).unwrap_or(u16::MAX);
    [
        Constraint::Length(len(widths[0])),
        Constraint::Length(len(widths[1])),
        Constraint::Length(len(widths[2])),
        Constraint::Length(len(widths[3])),
        Constraint::Min(len(widths[4])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockview_provider::ContainerId;

    fn row(name: &str, ports: &str) -> ContainerSummary {
        ContainerSummary {
            id: ContainerId::new(name),
            name: name.to_string(),
            image: "img".to_string(),
            state: "running".to_string(),
            status: "Up 1 second".to_string(),
            ports: ports.to_string(),
        }
    }

    #[test]
    fn test_widths_fit_header_when_empty() {
        let widths = column_widths(&[]);
        assert_eq!(widths[0], Constraint::Length(4));
        assert_eq!(widths[4], Constraint::Min(5));
    }

    #[test]
    fn test_widths_grow_to_widest_cell() {
        let widths = column_widths(&[
            row("a-very-long-name", "-"),
            row("b", "0.0.0.0:8080->80/tcp"),
        ]);
        assert_eq!(widths[0], Constraint::Length(16));
        assert_eq!(widths[1], Constraint::Length(5));
        assert_eq!(widths[3], Constraint::Length(11));
        assert_eq!(widths[4], Constraint::Min(20));
    }
}
