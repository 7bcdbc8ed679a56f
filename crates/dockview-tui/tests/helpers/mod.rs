use dockview_config::DashboardConfig;
use dockview_core::test_support::MockProvider;
use dockview_core::Dashboard;
use dockview_provider::ContainerProvider;
use dockview_tui::{App, RefreshTrigger};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;

/// Build an App over the mock without fetching anything
#[allow(dead_code)]
pub fn app_for(mock: &Arc<MockProvider>) -> App {
    let provider: Arc<dyn ContainerProvider> = mock.clone();
    App::new(Dashboard::new(provider, &DashboardConfig::default()))
}

/// Build an App and let its startup refresh (and the auto-selection) finish
#[allow(dead_code)]
pub async fn started_app(mock: &Arc<MockProvider>) -> App {
    let mut app = app_for(mock);
    app.request_refresh(RefreshTrigger::Startup);
    app.settle().await;
    app
}

/// Render the app to a TestBackend and capture output as a string
#[allow(dead_code)]
pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| dockview_tui::ui::draw(frame, app))
        .unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer_to_string(&buffer)
}

/// Convert a ratatui buffer to a string representation
#[allow(dead_code)]
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            let cell = buffer.get(x, y);
            output.push_str(cell.symbol());
        }
        output.push('\n');
    }
    output
}
