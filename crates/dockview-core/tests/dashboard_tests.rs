//! Dashboard behavior against a mock daemon

use dockview_config::DashboardConfig;
use dockview_core::test_support::{mock_container_record, MockCall, MockProvider};
use dockview_core::{CoreError, Dashboard, DetailPane, LogPane, NO_LOGS};
use dockview_provider::{ContainerProvider, ProviderError};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn dashboard(mock: &Arc<MockProvider>) -> Dashboard {
    let provider: Arc<dyn ContainerProvider> = mock.clone();
    Dashboard::new(provider, &DashboardConfig::default())
}

fn dashboard_with_timeout(mock: &Arc<MockProvider>, timeout: Duration) -> Dashboard {
    let provider: Arc<dyn ContainerProvider> = mock.clone();
    let config = DashboardConfig {
        request_timeout: timeout,
        ..Default::default()
    };
    Dashboard::new(provider, &config)
}

#[tokio::test]
async fn test_refresh_lists_all_and_sorts_running_first() {
    let mock = Arc::new(MockProvider::new().with_containers(vec![
        mock_container_record("id-a", "a", "exited"),
        mock_container_record("id-b", "b", "running"),
    ]));

    let rows = dashboard(&mock).refresh().await.unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(rows[0].state, "running");
    assert_eq!(rows[1].state, "exited");
    assert_eq!(mock.get_calls(), vec![MockCall::List { all: true }]);
}

#[tokio::test]
async fn test_refresh_empty_list() {
    let mock = Arc::new(MockProvider::new());
    let rows = dashboard(&mock).refresh().await.unwrap();
    assert!(rows.is_empty());
    assert!(mock.inspected_ids().is_empty());
}

#[tokio::test]
async fn test_refresh_failure_is_reported() {
    let mock = Arc::new(MockProvider::new());
    *mock.list_result.lock().unwrap() =
        Err(ProviderError::ConnectionError("daemon went away".into()));

    let err = dashboard(&mock).refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::Provider(_)));
    assert!(err.to_string().contains("daemon went away"));
}

#[tokio::test]
async fn test_show_fetches_detail_and_tail() {
    let mock = Arc::new(
        MockProvider::new()
            .with_containers(vec![mock_container_record("id-web", "web", "running")])
            .with_logs("2024-01-01T00:00:00Z started\r\n2024-01-01T00:00:01Z ready\r\n"),
    );
    let dash = dashboard(&mock);
    let rows = dash.refresh().await.unwrap();

    let selection = dash.show(&rows[0]).await;

    assert_eq!(selection.id.0, "id-web");
    assert_eq!(selection.detail.field("Name"), Some("web"));
    assert_eq!(selection.detail.field("ID"), Some("id-web"));
    assert_eq!(selection.detail.field("State"), Some("running"));
    assert!(selection.detail.field("Started").is_some());
    assert_eq!(
        selection.logs,
        LogPane::Text("2024-01-01T00:00:00Z started\n2024-01-01T00:00:01Z ready".into())
    );
    assert!(mock.was_called(&MockCall::Inspect {
        id: "id-web".into()
    }));
    assert!(mock.was_called(&MockCall::Logs {
        id: "id-web".into(),
        tail: Some(5)
    }));
}

#[tokio::test]
async fn test_whitespace_logs_show_placeholder() {
    let mock = Arc::new(
        MockProvider::new()
            .with_containers(vec![mock_container_record("id-1", "quiet", "running")])
            .with_logs("  \r\n\n\t "),
    );
    let dash = dashboard(&mock);
    let rows = dash.refresh().await.unwrap();

    let selection = dash.show(&rows[0]).await;
    assert_eq!(selection.logs, LogPane::Text(NO_LOGS.into()));
    assert_eq!(selection.logs.plain_text(), "(no logs)");
}

#[tokio::test]
async fn test_inspect_failure_does_not_block_logs() {
    let mock = Arc::new(
        MockProvider::new()
            .with_containers(vec![mock_container_record("id-1", "web", "running")])
            .with_logs("2024-01-01T00:00:00Z hello"),
    );
    *mock.inspect_result.lock().unwrap() =
        Err(ProviderError::ContainerNotFound("id-1".into()));
    let dash = dashboard(&mock);
    let rows = dash.refresh().await.unwrap();

    let selection = dash.show(&rows[0]).await;

    assert!(matches!(
        selection.detail,
        DetailPane::Error(ref msg) if msg.starts_with("Inspect error:")
    ));
    assert_eq!(
        selection.logs,
        LogPane::Text("2024-01-01T00:00:00Z hello".into())
    );
}

#[tokio::test]
async fn test_log_failure_does_not_block_detail() {
    let mock = Arc::new(
        MockProvider::new().with_containers(vec![mock_container_record("id-1", "web", "exited")]),
    );
    *mock.logs_result.lock().unwrap() = Err(ProviderError::RuntimeError("no log driver".into()));
    let dash = dashboard(&mock);
    let rows = dash.refresh().await.unwrap();

    let selection = dash.show(&rows[0]).await;

    assert_eq!(selection.detail.field("Name"), Some("web"));
    assert!(selection.logs.is_error());
    assert!(selection.logs.plain_text().starts_with("Logs error:"));
    assert!(selection.logs.plain_text().contains("no log driver"));
}

#[tokio::test]
async fn test_reselect_fetches_again() {
    let mock = Arc::new(
        MockProvider::new().with_containers(vec![mock_container_record("id-1", "web", "running")]),
    );
    let dash = dashboard(&mock);
    let rows = dash.refresh().await.unwrap();

    dash.show(&rows[0]).await;
    dash.show(&rows[0]).await;

    assert_eq!(mock.inspected_ids(), vec!["id-1", "id-1"]);
}

#[tokio::test]
async fn test_hung_daemon_times_out() {
    let mock = Arc::new(MockProvider::new());
    *mock.hang.lock().unwrap() = true;
    let dash = dashboard_with_timeout(&mock, Duration::from_millis(50));

    let started = Instant::now();
    let err = dash.refresh().await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::Timeout {
            operation: "list containers",
            ..
        }
    ));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_hung_selection_reports_both_panes() {
    let mock = Arc::new(
        MockProvider::new().with_containers(vec![mock_container_record("id-1", "web", "running")]),
    );
    let dash = dashboard_with_timeout(&mock, Duration::from_millis(50));
    let rows = dash.refresh().await.unwrap();
    *mock.hang.lock().unwrap() = true;

    let selection = dash.show(&rows[0]).await;

    assert!(selection.detail.plain_text().contains("timed out"));
    assert!(selection.logs.plain_text().contains("timed out"));
}
