//! Docker provider implementation using bollard

use crate::{
    ContainerDetail, ContainerId, ContainerProvider, ContainerRecord, ContainerStateInfo,
    LogConfig, LogStream, PortBinding, ProviderError, ProviderInfo, Result,
};
use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions, LogsOptions};
use bollard::models::{ContainerInspectResponse, ContainerSummary, Port};
use bollard::Docker;
use dockview_config::{DaemonAddress, DockerConfig};
use std::pin::Pin;
use std::time::Duration;
use tokio::io::AsyncRead;

/// Docker provider using bollard crate
pub struct DockerProvider {
    client: Docker,
    address: DaemonAddress,
}

impl DockerProvider {
    /// Connect to the daemon, negotiate the API version and ping it.
    ///
    /// `timeout` bounds the whole handshake and is also handed to bollard as
    /// its per-request transport timeout.
    pub async fn connect(config: &DockerConfig, timeout: Duration) -> Result<Self> {
        let address = config.address()?;
        let secs = timeout.as_secs().max(1);

        let client = match &address {
            DaemonAddress::Unix(path) => {
                Docker::connect_with_socket(path, secs, bollard::API_DEFAULT_VERSION)
            }
            DaemonAddress::Http(url) => {
                Docker::connect_with_http(url, secs, bollard::API_DEFAULT_VERSION)
            }
            DaemonAddress::NamedPipe(path) => connect_named_pipe(path, secs)?,
        }
        .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let handshake = async {
            let client = client.negotiate_version().await?;
            let provider = Self {
                client,
                address: address.clone(),
            };
            provider.ping().await?;
            Ok::<_, ProviderError>(provider)
        };

        let provider = match tokio::time::timeout(timeout, handshake).await {
            Ok(Ok(provider)) => provider,
            Ok(Err(ProviderError::ConnectionError(reason))) => {
                return Err(ProviderError::ConnectionError(format_connection_error(
                    &address, &reason,
                )))
            }
            Ok(Err(e)) => {
                return Err(ProviderError::ConnectionError(format_connection_error(
                    &address,
                    &e.to_string(),
                )))
            }
            Err(_) => {
                return Err(ProviderError::ConnectionError(format_connection_error(
                    &address,
                    &format!("no answer within {:?}", timeout),
                )))
            }
        };

        tracing::info!("Connected to Docker at {}", address);
        Ok(provider)
    }
}

#[cfg(windows)]
fn connect_named_pipe(
    path: &str,
    secs: u64,
) -> Result<std::result::Result<Docker, bollard::errors::Error>> {
    Ok(Docker::connect_with_named_pipe(
        path,
        secs,
        bollard::API_DEFAULT_VERSION,
    ))
}

#[cfg(not(windows))]
fn connect_named_pipe(
    path: &str,
    _secs: u64,
) -> Result<std::result::Result<Docker, bollard::errors::Error>> {
    Err(ProviderError::ConnectionError(format!(
        "named pipe {} is only reachable on Windows",
        path
    )))
}

#[async_trait]
impl ContainerProvider for DockerProvider {
    async fn list(&self, all: bool) -> Result<Vec<ContainerRecord>> {
        let options = ListContainersOptions::<String> {
            all,
            ..Default::default()
        };

        let containers = self.client.list_containers(Some(options)).await?;
        tracing::debug!("Daemon listed {} containers", containers.len());

        Ok(containers.into_iter().map(record_from_summary).collect())
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetail> {
        let info = self
            .client
            .inspect_container(&id.0, None::<InspectContainerOptions>)
            .await?;

        Ok(detail_from_inspect(id, info))
    }

    async fn logs(&self, id: &ContainerId, config: &LogConfig) -> Result<LogStream> {
        let options = LogsOptions::<String> {
            follow: false,
            stdout: config.stdout,
            stderr: config.stderr,
            tail: config
                .tail
                .map(|t| t.to_string())
                .unwrap_or_else(|| "all".to_string()),
            timestamps: config.timestamps,
            ..Default::default()
        };

        let stream = Box::pin(self.client.logs(&id.0, Some(options)));
        let reader = LogOutputReader::new(stream);

        Ok(LogStream {
            stream: Box::pin(reader),
        })
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .ping()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            address: self.address.to_string(),
            api_version: {
                let version = self.client.client_version();
                format!("{}.{}", version.major_version, version.minor_version)
            },
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Convert a list entry into the provider's record type
fn record_from_summary(c: ContainerSummary) -> ContainerRecord {
    ContainerRecord {
        id: ContainerId::new(c.id.unwrap_or_default()),
        names: c.names.unwrap_or_default(),
        image: c.image.unwrap_or_default(),
        state: c.state.unwrap_or_default(),
        status: c.status.unwrap_or_default(),
        ports: c
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(binding_from_port)
            .collect(),
    }
}

fn binding_from_port(p: Port) -> PortBinding {
    PortBinding {
        ip: p.ip.filter(|ip| !ip.is_empty()),
        private_port: p.private_port,
        public_port: p.public_port,
        protocol: p.typ.map(|t| t.to_string()).unwrap_or_default(),
    }
}

/// Convert an inspection response, keeping only what the dashboard shows
fn detail_from_inspect(id: &ContainerId, info: ContainerInspectResponse) -> ContainerDetail {
    let state = info
        .state
        .map(|s| ContainerStateInfo {
            status: s.status.map(|st| st.to_string()).unwrap_or_default(),
            started_at: s.started_at.filter(|t| !t.is_empty()),
        })
        .unwrap_or_default();

    // Prefer the image reference the container was created from over the digest
    let image = info
        .config
        .and_then(|c| c.image)
        .or(info.image)
        .unwrap_or_default();

    ContainerDetail {
        id: info.id.map(ContainerId::new).unwrap_or_else(|| id.clone()),
        image,
        state,
    }
}

/// Format a helpful connection error message with actionable instructions
fn format_connection_error(address: &DaemonAddress, underlying: &str) -> String {
    let mut msg = format!("Cannot connect to Docker at {}\n\n", address);

    if let DaemonAddress::Unix(path) = address {
        if !std::path::Path::new(path).exists() {
            msg.push_str(&format!(
                "The Docker API socket was not found at:\n  {}\n\n",
                path
            ));
            msg.push_str("To start Docker, run:\n");
            msg.push_str("  sudo systemctl enable --now docker\n");
            msg.push_str("or point DOCKER_HOST / --host at a running daemon.\n");
            return msg;
        }
    }

    msg.push_str("The daemon is not responding.\n\n");
    msg.push_str(&format!("Underlying error: {}\n", underlying));
    msg
}

/// Reader that converts log output stream to AsyncRead
struct LogOutputReader<S> {
    stream: S,
    buffer: Vec<u8>,
    pos: usize,
}

impl<S> LogOutputReader<S> {
    fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
            pos: 0,
        }
    }
}

impl<S> AsyncRead for LogOutputReader<S>
where
    S: futures::Stream<
            Item = std::result::Result<bollard::container::LogOutput, bollard::errors::Error>,
        > + Unpin,
{
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        use std::task::Poll;

        if self.pos < self.buffer.len() {
            let remaining = &self.buffer[self.pos..];
            let to_copy = std::cmp::min(remaining.len(), buf.remaining());
            buf.put_slice(&remaining[..to_copy]);
            self.pos += to_copy;
            return Poll::Ready(Ok(()));
        }

        self.buffer.clear();
        self.pos = 0;

        loop {
            match Pin::new(&mut self.stream).poll_next(cx) {
                Poll::Ready(Some(Ok(output))) => {
                    // stdout and stderr are interleaved in arrival order
                    let data = match output {
                        bollard::container::LogOutput::StdOut { message } => message,
                        bollard::container::LogOutput::StdErr { message } => message,
                        bollard::container::LogOutput::StdIn { message } => message,
                        bollard::container::LogOutput::Console { message } => message,
                    };
                    if data.is_empty() {
                        continue;
                    }
                    self.buffer = data.to_vec();

                    let to_copy = std::cmp::min(self.buffer.len(), buf.remaining());
                    buf.put_slice(&self.buffer[..to_copy]);
                    self.pos = to_copy;
                    return Poll::Ready(Ok(()));
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Err(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        e.to_string(),
                    )))
                }
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
