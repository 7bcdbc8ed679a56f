//! Dashboard configuration

use crate::{ConfigError, Result};
use std::time::Duration;

/// Default per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of log lines fetched for the selected container
pub const DEFAULT_LOG_TAIL: u64 = 5;

/// Settings for one dashboard session
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub docker: DockerConfig,
    /// Upper bound for every request sent to the daemon
    pub request_timeout: Duration,
    /// Number of trailing log lines shown for a selection
    pub log_tail: u64,
    /// How often the event loop wakes up without input
    pub tick_rate: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            docker: DockerConfig::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_tail: DEFAULT_LOG_TAIL,
            tick_rate: Duration::from_millis(250),
        }
    }
}

impl DashboardConfig {
    /// Check the settings before they are used to talk to the daemon
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.log_tail == 0 {
            return Err(ConfigError::Invalid(
                "log tail must be at least one line".to_string(),
            ));
        }
        self.docker.address()?;
        Ok(())
    }
}

/// Docker daemon connection settings
#[derive(Debug, Clone)]
pub struct DockerConfig {
    /// Daemon address (`unix://`, `tcp://`, `http(s)://`, `npipe://` or a socket path)
    pub host: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            host: default_docker_socket(),
        }
    }
}

impl DockerConfig {
    /// Parse the configured host into a connection target
    pub fn address(&self) -> Result<DaemonAddress> {
        DaemonAddress::parse(&self.host)
    }
}

#[cfg(windows)]
fn default_docker_socket() -> String {
    "npipe:////./pipe/docker_engine".to_string()
}

#[cfg(not(windows))]
fn default_docker_socket() -> String {
    "unix:///var/run/docker.sock".to_string()
}

/// Where the daemon listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonAddress {
    /// Local unix domain socket
    Unix(String),
    /// Windows named pipe
    NamedPipe(String),
    /// Plain HTTP endpoint, already normalised to `http://host:port`
    Http(String),
}

impl DaemonAddress {
    /// Parse a `DOCKER_HOST`-style address
    pub fn parse(host: &str) -> Result<Self> {
        let host = host.trim();
        let invalid = |reason: &str| ConfigError::InvalidHost {
            address: host.to_string(),
            reason: reason.to_string(),
        };

        if host.is_empty() {
            return Err(invalid("address is empty"));
        }

        if let Some(path) = host.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(invalid("socket path is empty"));
            }
            return Ok(Self::Unix(path.to_string()));
        }
        if let Some(path) = host.strip_prefix("npipe://") {
            if path.is_empty() {
                return Err(invalid("pipe path is empty"));
            }
            return Ok(Self::NamedPipe(path.to_string()));
        }
        if let Some(rest) = host.strip_prefix("tcp://") {
            if rest.is_empty() {
                return Err(invalid("host is empty"));
            }
            return Ok(Self::Http(format!("http://{}", rest)));
        }
        if host.starts_with("http://") || host.starts_with("https://") {
            return Ok(Self::Http(host.to_string()));
        }
        if host.starts_with('/') {
            return Ok(Self::Unix(host.to_string()));
        }

        tracing::debug!("Unrecognised daemon address {:?}", host);
        Err(invalid(
            "expected unix://, npipe://, tcp://, http:// or an absolute socket path",
        ))
    }
}

impl std::fmt::Display for DaemonAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix://{}", path),
            Self::NamedPipe(path) => write!(f, "npipe://{}", path),
            Self::Http(url) => write!(f, "{}", url),
        }
    }
}
