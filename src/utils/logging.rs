use tracing_subscriber::{EnvFilter, fmt};

use crate::utils::consts::LOG_LEVEL;

/// Install the global subscriber. Logs go to stderr so stdout holds only
/// what the operator asked for: the sender summary, the verdict line, or
/// the `--json` report, which can then be piped straight into `jq`.
pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` directives when they parse, else [`LOG_LEVEL`]
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(LOG_LEVEL).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
