//! Log setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Checked first; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "WEATHER_CHECK_LOG";

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("weather_check_core=debug,weather_check=debug");
    }
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, writing to stderr. Calling it again is
/// a no-op.
pub fn init(format: LogFormat, verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => {
            builder.json().try_init().ok();
        }
        LogFormat::Human => {
            builder.with_target(false).try_init().ok();
        }
    }
}
