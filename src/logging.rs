//! Tracing subscriber setup for the binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialise the global subscriber, writing to stderr.
///
/// `--debug` wins over everything; otherwise `RUST_LOG` is honoured, then the
/// configured level. HTTP internals are kept at `warn` so debug output stays
/// about the plan rather than the transport.
pub fn init_logging(debug: bool, configured_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug,hyper=warn,reqwest=warn,rustls=warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(normalize_level(configured_level)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}

/// Map level names such as `warning` or `critical` onto tracing directives.
fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        _ => "info",
    }
}
