//! Per-call records of a fallback run.

use crate::{FailureClass, ProviderFailure};
use polyglot_error::FallbackError;
use std::time::Duration;

/// What happened on a single `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The model returned text
    Succeeded,
    /// The model failed in a way that allows trying the next one
    Retryable(ProviderFailure),
    /// The model failed in a way that ends the run
    Fatal(ProviderFailure),
}

impl AttemptOutcome {
    /// Wrap a failure in the outcome matching its class.
    pub fn from_failure(failure: ProviderFailure) -> Self {
        match failure.class() {
            FailureClass::Retryable => AttemptOutcome::Retryable(failure),
            FailureClass::Fatal => AttemptOutcome::Fatal(failure),
        }
    }

    /// The failure detail, if the call failed.
    pub fn failure(&self) -> Option<&ProviderFailure> {
        match self {
            AttemptOutcome::Succeeded => None,
            AttemptOutcome::Retryable(failure) | AttemptOutcome::Fatal(failure) => Some(failure),
        }
    }
}

/// One `generate` call: which model, in which pass, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Attempt {
    model: String,
    pass: usize,
    outcome: AttemptOutcome,
}

impl Attempt {
    /// Record a finished call.
    pub fn new(model: impl Into<String>, pass: usize, outcome: AttemptOutcome) -> Self {
        Self {
            model: model.into(),
            pass,
            outcome,
        }
    }
}

/// Everything a run did, for diagnostics and tests.
///
/// Produced by [`FallbackOrchestrator::run_with_report`](crate::FallbackOrchestrator::run_with_report).
#[derive(Debug, derive_getters::Getters)]
pub struct FallbackReport {
    /// Calls in the order they were made
    attempts: Vec<Attempt>,
    /// Backoff delays in the order they were taken
    delays: Vec<Duration>,
    /// Terminal outcome
    result: Result<String, FallbackError>,
}

impl FallbackReport {
    pub(crate) fn new(
        attempts: Vec<Attempt>,
        delays: Vec<Duration>,
        result: Result<String, FallbackError>,
    ) -> Self {
        Self {
            attempts,
            delays,
            result,
        }
    }

    /// Consume the report, keeping only the terminal outcome.
    pub fn into_result(self) -> Result<String, FallbackError> {
        self.result
    }

    /// Models called, in order.
    pub fn models_called(&self) -> Vec<&str> {
        self.attempts.iter().map(|a| a.model.as_str()).collect()
    }
}
