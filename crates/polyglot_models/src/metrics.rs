//! Metrics for model provider calls.
//!
//! Instruments are created once on the global OpenTelemetry meter. Without an
//! installed meter provider they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use polyglot_retry::{FailureClass, ProviderFailure};
use std::sync::OnceLock;

static METRICS: OnceLock<ModelMetrics> = OnceLock::new();

/// Counters and latency for `generate` calls, labeled by provider and model.
#[derive(Clone)]
pub struct ModelMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Successful model calls
    pub requests: Counter<u64>,
    /// Failed model calls
    pub errors: Counter<u64>,
    /// Model call duration in seconds
    pub duration: Histogram<f64>,
}

impl std::fmt::Debug for ModelMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelMetrics").finish_non_exhaustive()
    }
}

impl ModelMetrics {
    fn init() -> Self {
        let meter = global::meter("polyglot_models");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("model.requests")
                .with_description("Successful model calls")
                .build(),
            errors: meter
                .u64_counter("model.errors")
                .with_description("Failed model calls")
                .build(),
            duration: meter
                .f64_histogram("model.duration")
                .with_unit("seconds")
                .with_description("Model call duration")
                .build(),
        }
    }

    /// Get the global model metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful call.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed call, labeled with how the orchestrator will treat it.
    pub fn record_error(&self, provider: &str, model: &str, failure: &ProviderFailure) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type(failure)),
        ];
        self.errors.add(1, labels);
    }
}

/// Metric label for a failure.
///
/// Returns one of `rate_limit`, `overload`, `auth`, `invalid_request`, `unknown`.
pub fn error_type(failure: &ProviderFailure) -> &'static str {
    let message = failure.message.to_lowercase();
    match (failure.class(), failure.status_code) {
        (FailureClass::Retryable, Some(429)) => "rate_limit",
        (FailureClass::Retryable, Some(503)) => "overload",
        (FailureClass::Retryable, _) if message.contains("overload") => "overload",
        (FailureClass::Retryable, _) => "rate_limit",
        (FailureClass::Fatal, Some(401 | 403)) => "auth",
        (FailureClass::Fatal, Some(400)) => "invalid_request",
        (FailureClass::Fatal, _) if message.contains("api key") => "auth",
        (FailureClass::Fatal, _) => "unknown",
    }
}
