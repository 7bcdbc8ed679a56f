//! The dashboard context: one daemon handle plus the request limits

use crate::format::{clean_logs, format_started, parse_started_at};
use crate::{
    build_summaries, ContainerSummary, CoreError, DetailField, DetailPane, LogPane, Result,
    NO_LOGS,
};
use chrono::{DateTime, Utc};
use dockview_config::DashboardConfig;
use dockview_provider::{ContainerDetail, ContainerId, ContainerProvider, LogConfig};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Panes produced for one selected row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: ContainerId,
    pub detail: DetailPane,
    pub logs: LogPane,
}

/// Owns the daemon client for the lifetime of the process.
///
/// Cloning is cheap and shares the same client, so a copy can be moved into
/// a background task.
#[derive(Clone)]
pub struct Dashboard {
    provider: Arc<dyn ContainerProvider>,
    request_timeout: Duration,
    log_tail: u64,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn ContainerProvider>, config: &DashboardConfig) -> Self {
        Self {
            provider,
            request_timeout: config.request_timeout,
            log_tail: config.log_tail,
        }
    }

    pub fn log_tail(&self) -> u64 {
        self.log_tail
    }

    /// List all containers, stopped ones included, as sorted table rows
    pub async fn refresh(&self) -> Result<Vec<ContainerSummary>> {
        tracing::debug!(timeout = ?self.request_timeout, "Listing containers");
        let records = self
            .bounded("list containers", self.provider.list(true))
            .await
            .inspect_err(|e| tracing::warn!("Container list failed: {}", e))?;
        Ok(build_summaries(records))
    }

    /// Fetch detail and recent logs for one row.
    ///
    /// The two requests run concurrently and fail independently; a failure
    /// only replaces the text of its own pane.
    pub async fn show(&self, summary: &ContainerSummary) -> Selection {
        tracing::debug!(id = %summary.id.short(), "Loading detail and logs");

        let (detail, logs) = tokio::join!(
            self.bounded("inspect container", self.provider.inspect(&summary.id)),
            self.fetch_logs(&summary.id),
        );

        Selection {
            id: summary.id.clone(),
            detail: detail_pane(summary, detail, Utc::now()),
            logs: log_pane(logs),
        }
    }

    async fn fetch_logs(&self, id: &ContainerId) -> Result<String> {
        let config = LogConfig::tail(self.log_tail);
        let read = async {
            let mut stream = self.provider.logs(id, &config).await?;
            let mut raw = Vec::new();
            stream.stream.read_to_end(&mut raw).await?;
            Ok::<_, dockview_provider::ProviderError>(raw)
        };

        let raw = self.bounded("fetch logs", read).await?;
        Ok(clean_logs(&String::from_utf8_lossy(&raw)))
    }

    /// Run one request inside its own timeout scope
    async fn bounded<T, F>(&self, operation: &'static str, request: F) -> Result<T>
    where
        F: Future<Output = dockview_provider::Result<T>>,
    {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CoreError::Timeout {
                operation,
                after: self.request_timeout,
            }),
        }
    }
}

/// Compose the details pane from the row and the inspection outcome
pub(crate) fn detail_pane(
    summary: &ContainerSummary,
    detail: Result<ContainerDetail>,
    now: DateTime<Utc>,
) -> DetailPane {
    let detail = match detail {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!(id = %summary.id.short(), "Inspect failed: {}", e);
            return DetailPane::Error(format!("Inspect error: {}", e));
        }
    };

    let mut fields = vec![
        DetailField::new("Name", summary.name.clone()),
        DetailField::new("ID", summary.id.to_string()),
        DetailField::new("Image", summary.image.clone()),
        // Live state from the inspection, which may be newer than the row
        DetailField::new("State", detail.state.status),
        DetailField::new("Status", summary.status.clone()),
    ];

    if let Some(started) = detail
        .state
        .started_at
        .as_deref()
        .and_then(parse_started_at)
    {
        fields.push(DetailField::new("Started", format_started(started, now)));
    }

    DetailPane::Fields(fields)
}

pub(crate) fn log_pane(logs: Result<String>) -> LogPane {
    match logs {
        Ok(text) if text.trim().is_empty() => LogPane::Text(NO_LOGS.to_string()),
        Ok(text) => LogPane::Text(text),
        Err(e) => {
            tracing::warn!("Log fetch failed: {}", e);
            LogPane::Error(format!("Logs error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dockview_provider::{ContainerStateInfo, ProviderError};

    fn summary() -> ContainerSummary {
        ContainerSummary {
            id: ContainerId::new("abc123"),
            name: "web".to_string(),
            image: "nginx:latest".to_string(),
            state: "running".to_string(),
            status: "Up 2 hours".to_string(),
            ports: "-".to_string(),
        }
    }

    fn detail(status: &str, started_at: Option<&str>) -> ContainerDetail {
        ContainerDetail {
            id: ContainerId::new("abc123"),
            image: "nginx:latest".to_string(),
            state: ContainerStateInfo {
                status: status.to_string(),
                started_at: started_at.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_detail_fields_in_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let pane = detail_pane(
            &summary(),
            Ok(detail("exited", Some("2024-03-01T10:00:00Z"))),
            now,
        );

        let DetailPane::Fields(fields) = &pane else {
            panic!("expected fields, got {pane:?}");
        };
        let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, ["Name", "ID", "Image", "State", "Status", "Started"]);
        assert_eq!(pane.field("State"), Some("exited"));
        assert_eq!(pane.field("Status"), Some("Up 2 hours"));
        assert!(pane.field("Started").unwrap().ends_with("(2 hours ago)"));
    }

    #[test]
    fn test_unparseable_start_omits_line() {
        let now = Utc::now();
        let pane = detail_pane(&summary(), Ok(detail("created", Some("garbage"))), now);
        assert_eq!(pane.field("Started"), None);

        let pane = detail_pane(
            &summary(),
            Ok(detail("created", Some("0001-01-01T00:00:00Z"))),
            now,
        );
        assert_eq!(pane.field("Started"), None);
        assert_eq!(pane.field("Name"), Some("web"));
    }

    #[test]
    fn test_inspect_error_pane() {
        let err = CoreError::Provider(ProviderError::ContainerNotFound("abc123".into()));
        let pane = detail_pane(&summary(), Err(err), Utc::now());
        assert!(pane.is_error());
        assert!(pane.plain_text().starts_with("Inspect error:"));
    }

    #[test]
    fn test_log_pane_placeholder() {
        assert_eq!(log_pane(Ok(String::new())), LogPane::Text(NO_LOGS.to_string()));
        assert_eq!(
            log_pane(Ok("2024-01-01T00:00:00Z hello".into())),
            LogPane::Text("2024-01-01T00:00:00Z hello".into())
        );
    }

    #[test]
    fn test_log_pane_timeout_error() {
        let pane = log_pane(Err(CoreError::Timeout {
            operation: "fetch logs",
            after: Duration::from_secs(10),
        }));
        assert_eq!(
            pane,
            LogPane::Error("Logs error: fetch logs timed out after 10s".into())
        );
    }
}
