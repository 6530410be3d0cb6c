//! Tracing subscriber setup.

use polyglot_error::{ServerError, ServerErrorKind};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How log lines are filtered and formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. "info", "polyglot_retry=debug")
    pub default_filter: String,
    /// Emit one JSON object per line instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Debug-level filter when `verbose`, info otherwise.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            default_filter: if verbose { "debug" } else { "info" }.to_string(),
            json,
        }
    }

    /// Resolve the filter: `RUST_LOG` wins over the configured default.
    ///
    /// # Errors
    ///
    /// Returns an error if the default filter does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ServerError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.default_filter))
            .map_err(|e| ServerError::new(ServerErrorKind::Logging(e.to_string())))
    }

    /// Formatting layer matching this configuration.
    pub fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if self.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .boxed()
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(config.env_filter()?)
        .with(config.fmt_layer())
        .try_init()
        .map_err(|e| ServerError::new(ServerErrorKind::Logging(e.to_string())))
}
