//! Error types for the Polyglot tutoring relay.
//!
//! This crate provides the foundation error types used throughout the Polyglot workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use polyglot_error::{PolyglotResult, ProviderError, ProviderErrorKind};
//!
//! fn fetch_reply() -> PolyglotResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::MissingApiKey(
//!         "GOOGLE_GENERATIVE_AI_API_KEY".to_string(),
//!     )))?
//! }
//!
//! match fetch_reply() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fallback;
mod provider;
mod server;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{PolyglotError, PolyglotErrorKind, PolyglotResult};
pub use fallback::{EXHAUSTED_FALLBACK_MESSAGE, FallbackError, FallbackErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use server::{ServerError, ServerErrorKind};
