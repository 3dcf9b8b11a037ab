use crate::checker::Checker;
use crate::config::Config;
use crate::message::Target;
use crate::reporter::Reporter;
/// Monitor module for the vigil liveness checker
///
/// The monitor is the coordinator: it launches one checker task per
/// configured target, consumes completed targets from the shared result
/// channel one at a time, and relaunches a delayed re-check task for each
/// consumed target, forever.
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time;

/// The result channel is rendezvous-shaped: capacity 1 keeps checker tasks
/// parked on their send until the monitor has drained the previous result.
const RESULT_CHANNEL_CAPACITY: usize = 1;

pub struct Monitor {
    config: Config,
    checker: Arc<Checker>,
}

impl Monitor {
    pub fn new(config: Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let checker = Arc::new(Checker::new(reporter, config.probe_timeout)?);
        Ok(Self { config, checker })
    }

    /// Runs the monitor until a shutdown signal arrives.
    ///
    /// Every configured target gets an immediate first check; after that,
    /// each target received from the result channel gets a fresh task that
    /// sleeps for the check interval and then re-checks it. A target is
    /// therefore always either probing or waiting out its delay, never
    /// both. Up and down results feed the same relaunch path.
    ///
    /// The monitor keeps its own sender clone alive, so the receive loop
    /// never observes a closed channel; with zero configured targets it
    /// simply suspends until shutdown.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let (result_tx, mut result_rx) = mpsc::channel::<Target>(RESULT_CHANNEL_CAPACITY);

        tracing::info!("monitoring {} targets", self.config.targets.len());
        for url in &self.config.targets {
            self.spawn_check(Target::new(url.clone()), result_tx.clone(), None);
        }

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    tracing::info!("monitor received shutdown signal");
                    break;
                }
                Some(target) = result_rx.recv() => {
                    self.spawn_check(target, result_tx.clone(), Some(self.config.check_interval));
                }
            }
        }
    }

    fn spawn_check(
        &self,
        target: Target,
        result_tx: mpsc::Sender<Target>,
        delay: Option<time::Duration>,
    ) {
        let checker = Arc::clone(&self.checker);
        tokio::spawn(async move {
            if let Some(delay) = delay {
                time::sleep(delay).await;
            }
            checker.check(target, result_tx).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Outcome, Status};
    use async_trait::async_trait;
    use httptest::{Expectation, Server, matchers::*, responders};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::time::Duration;
    use tokio::time::timeout;

    struct ChannelReporter {
        tx: mpsc::UnboundedSender<Outcome>,
    }

    #[async_trait]
    impl Reporter for ChannelReporter {
        async fn report(&self, outcome: &Outcome) {
            let _ = self.tx.send(outcome.clone());
        }
    }

    fn test_config(targets: Vec<String>, check_interval: Duration) -> Config {
        Config {
            targets,
            check_interval,
            probe_timeout: Duration::from_secs(1),
        }
    }

    /// Spawns a monitor over `config` and returns the outcome stream, the
    /// shutdown trigger, and the monitor task handle.
    fn spawn_monitor(
        config: Config,
    ) -> (
        mpsc::UnboundedReceiver<Outcome>,
        watch::Sender<bool>,
        tokio::task::JoinHandle<()>,
    ) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let reporter = Arc::new(ChannelReporter { tx: outcome_tx });
        let monitor = Monitor::new(config, reporter).unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            monitor.run(shutdown_rx).await;
        });

        (outcome_rx, shutdown_tx, handle)
    }

    fn always_up_server(path: &'static str) -> Server {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", path))
                .times(..)
                .respond_with(responders::status_code(200)),
        );
        server
    }

    #[tokio::test]
    async fn test_first_round_reports_every_target() {
        let server = always_up_server("/");
        let targets: Vec<String> = (0..3)
            .map(|i| format!("{}?id={}", server.url_str("/"), i))
            .collect();

        // A long interval keeps re-checks out of the observation window.
        let (mut outcome_rx, shutdown_tx, handle) =
            spawn_monitor(test_config(targets.clone(), Duration::from_secs(60)));

        let mut reported = HashSet::new();
        for _ in 0..3 {
            let outcome = timeout(Duration::from_secs(5), outcome_rx.recv())
                .await
                .expect("first round did not complete")
                .unwrap();
            assert_eq!(outcome.status, Status::Up);
            reported.insert(outcome.target.as_str().to_string());
        }
        assert_eq!(reported, targets.into_iter().collect::<HashSet<_>>());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_rechecks_respect_the_interval() {
        let server = always_up_server("/");
        let interval = Duration::from_millis(200);
        let (mut outcome_rx, shutdown_tx, handle) =
            spawn_monitor(test_config(vec![server.url_str("/")], interval));

        let first = timeout(Duration::from_secs(5), outcome_rx.recv())
            .await
            .unwrap()
            .unwrap();
        let second = timeout(Duration::from_secs(5), outcome_rx.recv())
            .await
            .unwrap()
            .unwrap();

        let gap = (second.timestamp - first.timestamp)
            .to_std()
            .expect("probe start times out of order");
        assert!(
            gap >= interval,
            "re-check started after {:?}, expected at least {:?}",
            gap,
            interval
        );

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_target_stays_in_rotation() {
        // Connection refused on every cycle.
        let target = "http://127.0.0.1:1".to_string();
        let (mut outcome_rx, shutdown_tx, handle) =
            spawn_monitor(test_config(vec![target.clone()], Duration::from_millis(50)));

        for _ in 0..3 {
            let outcome = timeout(Duration::from_secs(5), outcome_rx.recv())
                .await
                .expect("failing target dropped from rotation")
                .unwrap();
            assert_eq!(outcome.target.as_str(), target);
            assert_eq!(outcome.status, Status::Down);
        }

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_mixed_targets_keep_independent_cadence() {
        let server = always_up_server("/");
        let up_target = server.url_str("/");
        let down_target = "http://127.0.0.1:1".to_string();

        let (mut outcome_rx, shutdown_tx, handle) = spawn_monitor(test_config(
            vec![up_target.clone(), down_target.clone()],
            Duration::from_millis(50),
        ));

        let mut ups = 0;
        let mut downs = 0;
        while ups < 3 || downs < 3 {
            let outcome = timeout(Duration::from_secs(5), outcome_rx.recv())
                .await
                .expect("a target missed its cycle")
                .unwrap();
            match outcome.status {
                Status::Up => {
                    assert_eq!(outcome.target.as_str(), up_target);
                    ups += 1;
                }
                Status::Down => {
                    assert_eq!(outcome.target.as_str(), down_target);
                    downs += 1;
                }
            }
        }

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_targets_suspends_without_error() {
        let (mut outcome_rx, shutdown_tx, handle) =
            spawn_monitor(test_config(vec![], Duration::from_millis(10)));

        // No checks ever complete, the receive loop just pends.
        assert!(
            timeout(Duration::from_millis(200), outcome_rx.recv())
                .await
                .is_err()
        );

        shutdown_tx.send(true).unwrap();
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("monitor did not stop on shutdown")
            .unwrap();
    }
}
