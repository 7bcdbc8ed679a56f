//! Container provider trait and Docker implementation for dockview
//!
//! The dashboard only ever reads from the daemon, so the trait is limited
//! to listing, inspecting and fetching logs.

mod docker;
mod error;
mod types;

pub use docker::DockerProvider;
pub use error::*;
pub use types::*;

use async_trait::async_trait;
use dockview_config::DashboardConfig;

/// Read-only access to a container runtime daemon
#[async_trait]
pub trait ContainerProvider: Send + Sync {
    /// List containers; stopped ones are included when `all` is set
    async fn list(&self, all: bool) -> Result<Vec<ContainerRecord>>;

    /// Get detailed information about a container
    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetail>;

    /// Get container logs (never follows)
    async fn logs(&self, id: &ContainerId, config: &LogConfig) -> Result<LogStream>;

    /// Check if the daemon is reachable
    async fn ping(&self) -> Result<()>;

    /// Get provider information
    fn info(&self) -> ProviderInfo;
}

/// Validate the configuration and connect to the configured daemon
pub async fn create_provider(config: &DashboardConfig) -> Result<Box<dyn ContainerProvider>> {
    config.validate()?;
    let provider = DockerProvider::connect(&config.docker, config.request_timeout).await?;
    Ok(Box::new(provider))
}
