use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

const FALLBACK_LEVEL: &str = "warn";

/// Install the global subscriber.
///
/// Logs go to stderr; stdout carries command output only. A second call
/// keeps the subscriber already installed.
pub fn init_logging(config: &LoggingConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(rust_log.as_deref(), &config.level);

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };

    let installed = tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::new(&directives))
        .try_init()
        .is_ok();

    tracing::debug!(directives = %directives, installed, "Logging initialized");
}

/// `RUST_LOG` wins over the configured level when it parses; a level that
/// does not parse falls back to `warn`.
fn filter_directives(rust_log: Option<&str>, level: &str) -> String {
    let usable = |d: &str| !d.trim().is_empty() && EnvFilter::try_new(d).is_ok();

    match rust_log {
        Some(env) if usable(env) => env.trim().to_string(),
        _ if usable(level) => level.trim().to_string(),
        _ => FALLBACK_LEVEL.to_string(),
    }
}
