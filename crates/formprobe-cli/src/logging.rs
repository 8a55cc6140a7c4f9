//! Logging initialisation via tracing-subscriber.
//!
//! Logs go to stderr so stdout stays reserved for results. `RUST_LOG`
//! overrides the level derived from `-v`/`-q`.

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the filter: `RUST_LOG` if set and valid, else the verbosity default
///
/// # Errors
///
/// Fails only if the built-in filter for `verbosity` does not parse.
pub fn filter_for(verbosity: Verbosity) -> CliResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(verbosity.log_filter()))
        .map_err(|e| CliError::logging(format!("invalid log filter: {e}")))
}

/// Install the global subscriber; JSON lines when `format` is JSON
///
/// # Errors
///
/// Fails if a subscriber is already installed.
pub fn init(verbosity: Verbosity, format: OutputFormat, color: bool) -> CliResult<()> {
    let filter = filter_for(verbosity)?;
    let layer = match format {
        OutputFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .boxed(),
        OutputFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(color)
            .compact()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| CliError::logging(format!("failed to set subscriber: {e}")))
}
