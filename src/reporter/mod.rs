/// Reporter module for the vigil liveness checker
///
/// The reporter is the presentation seam: the checker hands every completed
/// outcome to a `Reporter`, and the implementation decides how to surface
/// it. The default implementation writes one line per check to stdout.
mod stdout;

pub use stdout::StdoutReporter;

use crate::message::Outcome;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Surfaces one completed check.
    async fn report(&self, outcome: &Outcome);
}
