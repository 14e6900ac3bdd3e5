//! Tracing subscriber setup.
//!
//! Events go to stdout as one JSON object per line. `LOG_FORMAT=text`
//! switches to compact human-readable lines for local runs.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Shape of emitted log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Flattened JSON, one event per line.
    #[default]
    Json,
    /// Compact plain text.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown log format '{other}', expected json or text")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Failures while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to install log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Install the global subscriber.
///
/// `RUST_LOG` in the environment wins over `default_filter`. Fails if the
/// filter does not parse or a subscriber is already installed.
pub fn init_logging(default_filter: &str, format: LogFormat) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|source| LoggingError::Filter {
            filter: default_filter.to_string(),
            source,
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .try_init()?,
    }

    tracing::info!(%format, filter = %default_filter, "Logging initialized");
    Ok(())
}
