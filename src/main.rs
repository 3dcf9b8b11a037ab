/// Main module for the vigil liveness checker
///
/// Wires the pieces together: logging, configuration, the stdout reporter,
/// and the monitor. The monitor runs until SIGINT or SIGTERM arrives.
mod checker;
mod config;
mod logger;
mod message;
mod monitor;
mod reporter;

use anyhow::Result;
use config::Config;
use monitor::Monitor;
use reporter::StdoutReporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;
use tokio::time::timeout;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logger::init();

    let config = Config::from_toml_file().unwrap_or_else(|e| {
        tracing::warn!("no config file loaded, using defaults: {}", e);
        Config::default()
    });

    let monitor = Monitor::new(config, Arc::new(StdoutReporter::new()))?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor_handle = tokio::spawn(async move {
        monitor.run(shutdown_rx).await;
    });

    let mut sigint_stream = signal(SignalKind::interrupt())?;
    let mut sigterm_stream = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint_stream.recv() => {
            tracing::info!("SIGINT received, shutdown initiated");
        }
        _ = sigterm_stream.recv() => {
            tracing::info!("SIGTERM received, shutdown initiated");
        }
    }

    shutdown_tx.send(true)?;
    if timeout(SHUTDOWN_TIMEOUT, monitor_handle).await.is_err() {
        tracing::warn!(
            "monitor did not stop within {} seconds",
            SHUTDOWN_TIMEOUT.as_secs()
        );
    }
    tracing::info!("shutdown complete");

    Ok(())
}
