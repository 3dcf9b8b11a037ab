/// Logger module for the vigil liveness checker
///
/// Diagnostics go to stderr through a non-blocking writer so the check
/// result lines on stdout stay clean.
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// The returned guard must be held for the lifetime of the process;
/// dropping it flushes and stops the background log writer.
pub fn init() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vigil=info")),
        )
        .with_writer(writer)
        .init();
    guard
}
