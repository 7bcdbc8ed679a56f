//! Test support utilities for dockview-core
//!
//! Provides MockProvider and helpers for testing the dashboard without a
//! running Docker daemon.

use async_trait::async_trait;
use dockview_provider::*;
use std::sync::{Arc, Mutex};

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List { all: bool },
    Inspect { id: String },
    Logs { id: String, tail: Option<u64> },
    Ping,
}

/// Configurable mock container provider for testing
pub struct MockProvider {
    pub calls: Arc<Mutex<Vec<MockCall>>>,
    /// Result for list calls
    pub list_result: Arc<Mutex<Result<Vec<ContainerRecord>>>>,
    /// Result for inspect calls; the returned id is replaced by the requested one
    pub inspect_result: Arc<Mutex<Result<ContainerDetail>>>,
    /// Raw log bytes (as text) for logs calls
    pub logs_result: Arc<Mutex<Result<String>>>,
    /// When set, every request waits forever
    pub hang: Arc<Mutex<bool>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty list and default success results
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            list_result: Arc::new(Mutex::new(Ok(Vec::new()))),
            inspect_result: Arc::new(Mutex::new(Ok(mock_container_detail(
                "mock_container_id",
                "running",
            )))),
            logs_result: Arc::new(Mutex::new(Ok(String::new()))),
            hang: Arc::new(Mutex::new(false)),
        }
    }

    /// Replace the list result
    pub fn with_containers(self, records: Vec<ContainerRecord>) -> Self {
        *self.list_result.lock().unwrap() = Ok(records);
        self
    }

    /// Replace the logs result
    pub fn with_logs(self, text: impl Into<String>) -> Self {
        *self.logs_result.lock().unwrap() = Ok(text.into());
        self
    }

    /// Record a call
    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a specific call was made
    pub fn was_called(&self, call: &MockCall) -> bool {
        self.calls.lock().unwrap().contains(call)
    }

    /// Ids passed to inspect, in call order
    pub fn inspected_ids(&self) -> Vec<String> {
        self.get_calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Inspect { id } => Some(id),
                _ => None,
            })
            .collect()
    }

    async fn maybe_hang(&self) {
        let hang = *self.hang.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to clone a Result<T> from an Arc<Mutex<Result<T>>>
fn clone_result<T: Clone>(r: &Arc<Mutex<Result<T>>>) -> Result<T> {
    let guard = r.lock().unwrap();
    match &*guard {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(clone_provider_error(e)),
    }
}

/// Clone a ProviderError (thiserror types don't implement Clone)
fn clone_provider_error(e: &ProviderError) -> ProviderError {
    match e {
        ProviderError::ConnectionError(s) => ProviderError::ConnectionError(s.clone()),
        ProviderError::ContainerNotFound(s) => ProviderError::ContainerNotFound(s.clone()),
        ProviderError::RuntimeError(s) => ProviderError::RuntimeError(s.clone()),
        ProviderError::ConfigError(c) => ProviderError::RuntimeError(c.to_string()),
        ProviderError::IoError(_) => ProviderError::RuntimeError("IO error (cloned)".into()),
    }
}

/// Create a mock ContainerDetail
pub fn mock_container_detail(id: &str, status: &str) -> ContainerDetail {
    ContainerDetail {
        id: ContainerId::new(id),
        image: "mock_image:latest".to_string(),
        state: ContainerStateInfo {
            status: status.to_string(),
            started_at: Some("2024-01-01T00:00:00.000000000Z".to_string()),
        },
    }
}

/// Create a mock list record named `/<name>` with no ports
pub fn mock_container_record(id: &str, name: &str, state: &str) -> ContainerRecord {
    ContainerRecord {
        id: ContainerId::new(id),
        names: vec![format!("/{}", name)],
        image: format!("{}:latest", name),
        state: state.to_string(),
        status: if state == "running" {
            "Up 5 minutes".to_string()
        } else {
            "Exited (0) 2 hours ago".to_string()
        },
        ports: Vec::new(),
    }
}

#[async_trait]
impl ContainerProvider for MockProvider {
    async fn list(&self, all: bool) -> Result<Vec<ContainerRecord>> {
        self.record(MockCall::List { all });
        self.maybe_hang().await;
        clone_result(&self.list_result)
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetail> {
        self.record(MockCall::Inspect { id: id.0.clone() });
        self.maybe_hang().await;
        clone_result(&self.inspect_result).map(|mut detail| {
            detail.id = id.clone();
            detail
        })
    }

    async fn logs(&self, id: &ContainerId, config: &LogConfig) -> Result<LogStream> {
        self.record(MockCall::Logs {
            id: id.0.clone(),
            tail: config.tail,
        });
        self.maybe_hang().await;
        let text = clone_result(&self.logs_result)?;
        Ok(LogStream {
            stream: Box::pin(std::io::Cursor::new(text.into_bytes())),
        })
    }

    async fn ping(&self) -> Result<()> {
        self.record(MockCall::Ping);
        Ok(())
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            address: "mock://".to_string(),
            api_version: "1.44".to_string(),
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
        }
    }
}
