/// Message module for the vigil liveness checker
///
/// Defines the data structures passed between the checker tasks, the
/// monitor, and the reporter.
use std::fmt;

/// One URL to be periodically checked for reachability.
///
/// A `Target` is immutable once created and is always moved or cloned into
/// the task that inspects it; concurrent tasks never share one instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification of a single reachability probe.
///
/// Only transport-level failure (connection error, timeout, DNS failure)
/// counts as `Down`; HTTP error status codes still classify as `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn is_up(self) -> bool {
        matches!(self, Status::Up)
    }
}

/// The result of one completed check.
///
/// # Fields
/// * `target` - The checked target
/// * `status` - Classification of the probe
/// * `timestamp` - When the probe was started
/// * `duration` - Duration from issuing the request to completion or failure
#[derive(Debug, Clone)]
pub struct Outcome {
    pub target: Target,
    pub status: Status,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub duration: std::time::Duration,
}
