//! Ordered model fallback with bounded backoff.
//!
//! A [`FallbackOrchestrator`] tries a list of model identifiers, best first, against
//! a [`TextGenerator`]. Each full traversal of the list is a *pass*:
//!
//! - a success returns immediately,
//! - a [`FailureClass::Retryable`] failure (rate limit, overload) moves on to the next model,
//! - a [`FailureClass::Fatal`] failure aborts the whole run,
//! - a pass where every model failed retryably is followed by a backoff delay and
//!   another pass, until `max_passes` is reached.
//!
//! ```no_run
//! use polyglot_retry::{FallbackConfig, FallbackOrchestrator, ProviderFailure, TextGenerator};
//!
//! struct Echo;
//!
//! #[async_trait::async_trait]
//! impl TextGenerator for Echo {
//!     async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
//!         Ok(format!("{model}: {prompt}"))
//!     }
//! }
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = FallbackOrchestrator::new(Echo, &FallbackConfig::default())?;
//! let text = orchestrator.run("Bonjour").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attempt;
mod backoff;
mod classify;
mod config;
mod generator;
mod orchestrator;
mod sleeper;

pub use attempt::{Attempt, AttemptOutcome, FallbackReport};
pub use backoff::BackoffSchedule;
pub use classify::{FailureClass, ProviderFailure, classify};
pub use config::{DEFAULT_MODELS, FallbackConfig};
pub use generator::TextGenerator;
pub use orchestrator::FallbackOrchestrator;
pub use sleeper::{Sleeper, TokioSleeper};

pub use tokio_util::sync::CancellationToken;
