//! Tracing subscriber setup.
//!
//! The subscriber is installed once, from the [`LoggingConfig`] carried by the
//! application context. Console output is meant for interactive use, JSON for
//! log collection on batch systems.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the level filter for `config`.
pub fn env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log filter '{}'", config.level))
}

/// Install the global subscriber.
///
/// Fails if the level does not parse or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = env_filter(config)?;

    let layer = match config.format {
        LogFormat::Console => fmt::layer().with_target(false).boxed(),
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .json()
            .with_current_span(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    Ok(())
}
