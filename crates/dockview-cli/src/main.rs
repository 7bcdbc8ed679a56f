//! dockview - terminal dashboard for a Docker daemon

use anyhow::Context;
use clap::Parser;
use dockview_config::{DashboardConfig, DockerConfig};
use dockview_core::Dashboard;
use dockview_provider::{create_provider, ContainerProvider};
use dockview_tui::TuiOptions;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dockview")]
#[command(author, version, about = "Terminal dashboard for Docker containers", long_about = None)]
struct Cli {
    /// Daemon address (unix://, tcp://, http://, npipe:// or a socket path)
    #[arg(long, env = "DOCKER_HOST")]
    host: Option<String>,

    /// Seconds to wait for each request to the daemon
    #[arg(long, env = "DOCKVIEW_TIMEOUT", default_value_t = dockview_config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Number of trailing log lines shown for a container
    #[arg(long, env = "DOCKVIEW_LOG_TAIL", default_value_t = dockview_config::DEFAULT_LOG_TAIL)]
    tail: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file while the dashboard is open
    #[arg(long, env = "DOCKVIEW_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn dashboard_config(&self) -> DashboardConfig {
        let docker = match &self.host {
            Some(host) => DockerConfig { host: host.clone() },
            None => DockerConfig::default(),
        };
        DashboardConfig {
            docker,
            request_timeout: Duration::from_secs(self.timeout),
            log_tail: self.tail,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let config = cli.dashboard_config();
    config.validate()?;

    // Connection failures are fatal; there is nothing to show without a daemon
    let provider: Arc<dyn ContainerProvider> = Arc::from(create_provider(&config).await?);
    let info = provider.info();
    tracing::info!(
        "Connected to {} (API {}, {}/{})",
        info.address,
        info.api_version,
        info.os,
        info.arch
    );

    let options = TuiOptions {
        tick_rate: config.tick_rate,
        silence_tracing: cli.log_file.is_none(),
    };
    dockview_tui::run(Dashboard::new(provider, &config), options).await?;

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = cli.log_file.is_none().then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_build_config() {
        let cli = Cli::try_parse_from([
            "dockview",
            "--host",
            "tcp://127.0.0.1:2375",
            "--timeout",
            "3",
            "--tail",
            "20",
        ])
        .unwrap();

        let config = cli.dashboard_config();
        assert_eq!(config.docker.host, "tcp://127.0.0.1:2375");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.log_tail, 20);
    }

    #[test]
    fn test_non_numeric_timeout_rejected() {
        assert!(Cli::try_parse_from(["dockview", "--timeout", "soon"]).is_err());
    }
}
