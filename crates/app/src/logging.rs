use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Variable holding an `EnvFilter` directive, e.g. `EXAM_LOG=services=debug`.
pub const LOG_ENV: &str = "EXAM_LOG";

/// Default directive for a `-v` count when `EXAM_LOG` is unset.
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber. Logs stay off stdout so they never mix with
/// the questions or a `--json` report.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init(verbose: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
}
