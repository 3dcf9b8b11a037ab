use crate::message::{Outcome, Status};
use crate::reporter::Reporter;
use async_trait::async_trait;

/// Reporter that prints one line per completed check to stdout.
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl StdoutReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reporter for StdoutReporter {
    async fn report(&self, outcome: &Outcome) {
        match outcome.status {
            Status::Up => println!("{} is up!", outcome.target),
            Status::Down => println!("{} might be down!", outcome.target),
        }
        tracing::debug!(
            url = %outcome.target,
            status = ?outcome.status,
            duration = ?outcome.duration,
            "check completed"
        );
    }
}
