//! Model provider adapters for Polyglot.
//!
//! Each provider implements [`polyglot_retry::TextGenerator`] behind its own
//! feature flag, so the orchestrator never sees a client crate's error types.
//!
//! # Available Providers
//!
//! - **Gemini** (Google, serves Gemma too) - Enable with `gemini` feature
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use polyglot_models::{DEFAULT_API_KEY_ENV, GeminiGenerator};
//! use polyglot_retry::{FallbackConfig, FallbackOrchestrator};
//!
//! let generator = GeminiGenerator::from_env(DEFAULT_API_KEY_ENV)?;
//! let orchestrator = FallbackOrchestrator::new(generator, &FallbackConfig::default())?;
//! let reply = orchestrator.run("Student: \"Hallo!\"\nTutor:").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api_key;
mod metrics;

pub use api_key::{ApiKey, DEFAULT_API_KEY_ENV, LEGACY_API_KEY_ENV};
pub use metrics::{ModelMetrics, error_type};

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiGenerator;
