//! The fallback state machine.
//!
//! A run is a sequence of passes; a pass is a traversal of the model list.
//! [`FallbackOrchestrator::run_pass`] owns the per-model short-circuiting and
//! [`FallbackOrchestrator::run_with_report`] owns the pass loop and backoff, so
//! each level decides exactly one thing.

use crate::{
    Attempt, AttemptOutcome, FallbackConfig, FallbackReport, ProviderFailure, Sleeper,
    TextGenerator, TokioSleeper,
};
use polyglot_error::{ConfigError, FallbackError, FallbackErrorKind};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// How one pass over the model list ended.
#[derive(Debug)]
enum PassOutcome {
    /// A model produced text
    Succeeded(String),
    /// A model failed fatally; nothing further may be attempted
    Fatal {
        model: String,
        failure: ProviderFailure,
    },
    /// Every model failed retryably
    Exhausted,
    /// The cancellation token fired
    Cancelled {
        /// Whether a `generate` call had been started when it fired
        in_flight: bool,
    },
}

/// Tries models in order across bounded passes with backoff between them.
///
/// The orchestrator holds only immutable configuration and the provider
/// handle; every run keeps its own state, so one instance can serve any number
/// of concurrent requests behind an `Arc`.
///
/// # Guarantees
///
/// - at most `max_passes × models.len()` calls to the generator,
/// - a fatal failure stops the run immediately, mid-pass included,
/// - exhaustion surfaces the most recent retryable failure,
/// - the delay before pass `i + 1` is `backoff.delay(i)` and nothing is slept
///   after the final pass.
pub struct FallbackOrchestrator<G, S = TokioSleeper> {
    generator: G,
    sleeper: S,
    config: FallbackConfig,
}

impl<G, S> std::fmt::Debug for FallbackOrchestrator<G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackOrchestrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<G: TextGenerator> FallbackOrchestrator<G> {
    /// Create an orchestrator that sleeps on the tokio timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (empty model list,
    /// zero passes).
    pub fn new(generator: G, config: &FallbackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            generator,
            sleeper: TokioSleeper,
            config: config.clone(),
        })
    }
}

impl<G: TextGenerator, S: Sleeper> FallbackOrchestrator<G, S> {
    /// Replace the sleeper, e.g. with one that records delays in tests.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> FallbackOrchestrator<G, T> {
        FallbackOrchestrator {
            generator: self.generator,
            sleeper,
            config: self.config,
        }
    }

    /// The configuration this orchestrator runs with.
    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Run the fallback sequence for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`FallbackErrorKind::Fatal`] on the first non-retryable failure
    /// and [`FallbackErrorKind::Exhausted`] when every pass failed retryably.
    pub async fn run(&self, prompt: &str) -> Result<String, FallbackError> {
        self.run_until_cancelled(prompt, &CancellationToken::new())
            .await
    }

    /// Run the fallback sequence, aborting when `cancel` fires.
    ///
    /// Cancellation interrupts both a pending `generate` call and a backoff
    /// sleep.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus [`FallbackErrorKind::Cancelled`].
    pub async fn run_until_cancelled(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, FallbackError> {
        self.run_with_report(prompt, cancel).await.into_result()
    }

    /// Run the fallback sequence and keep a record of every call and delay.
    #[instrument(
        skip_all,
        fields(
            models = self.config.models().len(),
            max_passes = *self.config.max_passes(),
            prompt_chars = prompt.len()
        )
    )]
    pub async fn run_with_report(&self, prompt: &str, cancel: &CancellationToken) -> FallbackReport {
        let max_passes = *self.config.max_passes();
        let mut attempts = Vec::with_capacity(self.config.max_attempts());
        let mut delays = Vec::new();

        for pass in 0..max_passes {
            match self.run_pass(pass, prompt, cancel, &mut attempts).await {
                PassOutcome::Succeeded(text) => {
                    return FallbackReport::new(attempts, delays, Ok(text));
                }
                PassOutcome::Fatal { model, failure } => {
                    warn!(
                        model = %model,
                        pass,
                        status_code = ?failure.status_code,
                        error = %failure,
                        "Non-retryable provider error, aborting"
                    );
                    let err = FallbackError::new(FallbackErrorKind::Fatal {
                        model,
                        status_code: failure.status_code,
                        message: failure.message,
                    });
                    return FallbackReport::new(attempts, delays, Err(err));
                }
                PassOutcome::Cancelled { in_flight } => {
                    let started = attempts.len() + usize::from(in_flight);
                    return Self::cancelled(attempts, delays, started);
                }
                PassOutcome::Exhausted => {}
            }

            if pass + 1 < max_passes {
                let delay = self.config.backoff().delay(pass);
                info!(
                    pass,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Every model is busy, backing off before the next pass"
                );
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        let started = attempts.len();
                        return Self::cancelled(attempts, delays, started);
                    }
                    _ = self.sleeper.sleep(delay) => {}
                }
                delays.push(delay);
            }
        }

        let last = attempts
            .last()
            .and_then(|attempt| attempt.outcome().failure())
            .cloned()
            .unwrap_or_else(|| ProviderFailure::new(""));
        warn!(
            attempts = attempts.len(),
            status_code = ?last.status_code,
            error = %last,
            "All fallback passes exhausted"
        );
        let err = FallbackError::new(FallbackErrorKind::Exhausted {
            attempts: attempts.len(),
            status_code: last.status_code,
            message: last.message,
        });
        FallbackReport::new(attempts, delays, Err(err))
    }

    /// Try each model once, in order, stopping at the first success or fatal failure.
    async fn run_pass(
        &self,
        pass: usize,
        prompt: &str,
        cancel: &CancellationToken,
        attempts: &mut Vec<Attempt>,
    ) -> PassOutcome {
        for model in self.config.models() {
            if cancel.is_cancelled() {
                return PassOutcome::Cancelled { in_flight: false };
            }

            debug!(model = %model, pass, "Invoking model");
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return PassOutcome::Cancelled { in_flight: true },
                result = self.generator.generate(model, prompt) => result,
            };

            match result {
                Ok(text) => {
                    info!(model = %model, pass, "Model produced a response");
                    attempts.push(Attempt::new(model.as_str(), pass, AttemptOutcome::Succeeded));
                    return PassOutcome::Succeeded(text);
                }
                Err(failure) => {
                    let outcome = AttemptOutcome::from_failure(failure.clone());
                    let fatal = matches!(outcome, AttemptOutcome::Fatal(_));
                    attempts.push(Attempt::new(model.as_str(), pass, outcome));
                    if fatal {
                        return PassOutcome::Fatal {
                            model: model.clone(),
                            failure,
                        };
                    }
                    warn!(
                        model = %model,
                        pass,
                        status_code = ?failure.status_code,
                        error = %failure,
                        "Retryable provider error, trying next model"
                    );
                }
            }
        }
        PassOutcome::Exhausted
    }

    fn cancelled(
        attempts: Vec<Attempt>,
        delays: Vec<std::time::Duration>,
        started: usize,
    ) -> FallbackReport {
        info!(attempts = started, "Fallback run cancelled");
        let err = FallbackError::new(FallbackErrorKind::Cancelled { attempts: started });
        FallbackReport::new(attempts, delays, Err(err))
    }
}
