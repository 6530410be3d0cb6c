//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the polyglot binary.

mod ask;
mod commands;
mod models;
mod serve;

pub use ask::handle_ask_command;
pub use commands::{Cli, Commands};
pub use models::handle_models_command;
pub use serve::handle_serve_command;

use polyglot_error::PolyglotResult;
use polyglot_models::GeminiGenerator;
use polyglot_retry::TextGenerator;
use polyglot_server::{ChatOrchestrator, PolyglotConfig};
use std::sync::Arc;

/// Build the orchestrator over the Gemini adapter.
///
/// Fails before any request is served when the API key is missing.
fn build_orchestrator(config: &PolyglotConfig) -> PolyglotResult<ChatOrchestrator> {
    let generator: Arc<dyn TextGenerator> =
        Arc::new(GeminiGenerator::from_env(config.provider().api_key_env())?);
    Ok(ChatOrchestrator::new(generator, config.fallback())?)
}
