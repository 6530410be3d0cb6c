//! Serve command handler.

use super::build_orchestrator;
use polyglot_error::PolyglotResult;
use polyglot_retry::CancellationToken;
use polyglot_server::{AppState, PolyglotConfig, bind, serve, shutdown_signal};
use std::path::Path;
use tracing::info;

/// Handle the `serve` command
pub async fn handle_serve_command(
    config_path: Option<&Path>,
    bind_override: Option<String>,
) -> PolyglotResult<()> {
    let mut config = PolyglotConfig::load(config_path)?;
    if let Some(addr) = bind_override {
        config = config.with_bind(addr)?;
    }

    let orchestrator = build_orchestrator(&config)?;
    let state = AppState::new(orchestrator, config.tutor_prompt()?, CancellationToken::new());

    let listener = bind(config.server().bind_addr()?).await?;
    info!("Polyglot relay ready. Press Ctrl+C to stop.");
    serve(listener, state, shutdown_signal()).await?;
    Ok(())
}
