//! Common types for container providers

use std::pin::Pin;
use tokio::io::AsyncRead;

/// Container ID wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(12) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One container as reported by the list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRecord {
    pub id: ContainerId,
    /// Names as reported by the daemon, usually prefixed with `/`
    pub names: Vec<String>,
    pub image: String,
    /// Lifecycle state such as `running` or `exited`
    pub state: String,
    /// Human status such as `Up 3 hours`
    pub status: String,
    pub ports: Vec<PortBinding>,
}

/// A port binding on a listed container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    /// Host address the public port is bound to
    pub ip: Option<String>,
    pub private_port: u16,
    /// Host port, absent (or zero) when the port is only exposed
    pub public_port: Option<u16>,
    /// Protocol as reported (`tcp`, `udp`, `sctp`), case not normalised
    pub protocol: String,
}

/// Inspection result for a single container
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDetail {
    pub id: ContainerId,
    pub image: String,
    pub state: ContainerStateInfo,
}

/// Live state block of an inspection result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerStateInfo {
    /// Lifecycle state at inspection time
    pub status: String,
    /// Start time exactly as the daemon sent it (RFC 3339)
    pub started_at: Option<String>,
}

/// Log configuration
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Show stdout
    pub stdout: bool,
    /// Show stderr
    pub stderr: bool,
    /// Number of lines from end to show
    pub tail: Option<u64>,
    /// Show timestamps
    pub timestamps: bool,
}

impl LogConfig {
    /// Both streams with timestamps, last `n` lines
    pub fn tail(n: u64) -> Self {
        Self {
            stdout: true,
            stderr: true,
            tail: Some(n),
            timestamps: true,
        }
    }
}

/// Log stream
pub struct LogStream {
    pub stream: Pin<Box<dyn AsyncRead + Send>>,
}

impl std::fmt::Debug for LogStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStream").finish_non_exhaustive()
    }
}

/// Provider information
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub address: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        let id = ContainerId::new("4f66ad9a0b2e8c1d7e3f");
        assert_eq!(id.short(), "4f66ad9a0b2e");
        assert_eq!(ContainerId::new("abc").short(), "abc");
    }

    #[test]
    fn test_log_config_tail() {
        let config = LogConfig::tail(5);
        assert!(config.stdout && config.stderr && config.timestamps);
        assert_eq!(config.tail, Some(5));
    }
}
