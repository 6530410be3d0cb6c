//! HTTP relay for the Polyglot language tutor.
//!
//! Accepts a student message and its conversation history, renders the tutor
//! prompt, and runs it through the model fallback order.
//!
//! # Example
//!
//! ```rust,no_run
//! use polyglot_server::{AppState, ChatOrchestrator, PolyglotConfig, bind, serve, shutdown_signal};
//! use polyglot_retry::{CancellationToken, TextGenerator};
//! use std::sync::Arc;
//!
//! # async fn demo(generator: Arc<dyn TextGenerator>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = PolyglotConfig::load(None)?;
//! let orchestrator = ChatOrchestrator::new(generator, config.fallback())?;
//! let state = AppState::new(orchestrator, config.tutor_prompt()?, CancellationToken::new());
//!
//! let listener = bind(config.server().bind_addr()?).await?;
//! serve(listener, state, shutdown_signal()).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod logging;
mod router;
mod server;
mod state;

pub use config::{PolyglotConfig, PromptSettings, ProviderSettings, ServerSettings};
pub use logging::{LoggingConfig, init_logging};
pub use router::{CHAT_PATH, create_router};
pub use server::{bind, serve, shutdown_signal};
pub use state::{AppState, ChatOrchestrator};
