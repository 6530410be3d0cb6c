//! One-shot ask command handler.

use super::build_orchestrator;
use polyglot_error::PolyglotResult;
use polyglot_retry::CancellationToken;
use polyglot_server::{PolyglotConfig, shutdown_signal};
use std::path::Path;
use tracing::debug;

/// Handle the `ask` command
///
/// Renders the tutor prompt for `message` with no history, runs the fallback
/// order, and prints the reply. Ctrl-C cancels the run.
pub async fn handle_ask_command(config_path: Option<&Path>, message: &str) -> PolyglotResult<()> {
    let config = PolyglotConfig::load(config_path)?;
    let orchestrator = build_orchestrator(&config)?;
    let prompt = config.tutor_prompt()?.render(message, &[]);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    let watcher = tokio::spawn(async move {
        shutdown_signal().await;
        on_ctrl_c.cancel();
    });

    let report = orchestrator.run_with_report(&prompt, &cancel).await;
    watcher.abort();

    debug!(
        attempts = report.attempts().len(),
        models = ?report.models_called(),
        delays = ?report.delays(),
        "Fallback run finished"
    );

    match report.into_result() {
        Ok(text) => {
            println!("{}", text.trim());
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}
