use crate::message::{Outcome, Status, Target};
use crate::reporter::Reporter;
/// Checker module for the vigil liveness checker
///
/// The checker performs a single reachability probe for one target,
/// reports the classified outcome, and hands the target back through the
/// result channel so the monitor can schedule the next check.
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct Checker {
    client: reqwest::Client,
    reporter: Arc<dyn Reporter>,
    probe_timeout: Duration,
}

impl Checker {
    pub fn new(reporter: Arc<dyn Reporter>, probe_timeout: Duration) -> Result<Self> {
        Ok(Self {
            // Probe on a fresh connection every cycle; a pooled connection
            // to a host that died since the last check would mask the outage.
            client: reqwest::ClientBuilder::new()
                .pool_max_idle_per_host(0)
                .build()
                .with_context(|| "failed to build reqwest client")?,
            reporter,
            probe_timeout,
        })
    }

    /// Performs exactly one reachability probe against `target`.
    ///
    /// Only transport-level failure classifies as down; an HTTP error
    /// status still counts as up. The outcome goes to the reporter, then
    /// the target is sent back on `result_tx` exactly once on every
    /// branch. The send suspends until the monitor drains the channel.
    pub async fn check(&self, target: Target, result_tx: mpsc::Sender<Target>) {
        let timestamp = chrono::Utc::now();
        let start = tokio::time::Instant::now();

        let status = match self
            .client
            .get(target.as_str())
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(_) => Status::Up,
            Err(e) => {
                tracing::debug!(url = %target, error = %e, "probe failed");
                Status::Down
            }
        };

        let outcome = Outcome {
            target: target.clone(),
            status,
            timestamp,
            duration: start.elapsed(),
        };
        self.reporter.report(&outcome).await;

        if let Err(e) = result_tx.send(target).await {
            tracing::warn!("failed to hand back target: {}", e);
        }
    }
}
