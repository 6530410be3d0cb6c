//! Shared handler state.

use polyglot_core::TutorPrompt;
use polyglot_retry::{CancellationToken, FallbackOrchestrator, TextGenerator};
use std::sync::Arc;

/// The orchestrator type the relay runs, with the provider behind a trait object.
pub type ChatOrchestrator = FallbackOrchestrator<Arc<dyn TextGenerator>>;

/// State cloned into every request handler.
///
/// Holds no per-request data; each request renders its own prompt and runs its
/// own fallback sequence.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<ChatOrchestrator>,
    prompt: Arc<TutorPrompt>,
    shutdown: CancellationToken,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("orchestrator", &self.orchestrator)
            .field("shutting_down", &self.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create handler state.
    pub fn new(orchestrator: ChatOrchestrator, prompt: TutorPrompt, shutdown: CancellationToken) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            prompt: Arc::new(prompt),
            shutdown,
        }
    }

    /// The shared orchestrator.
    pub fn orchestrator(&self) -> &ChatOrchestrator {
        &self.orchestrator
    }

    /// The prompt renderer.
    pub fn prompt(&self) -> &TutorPrompt {
        &self.prompt
    }

    /// Token cancelled when the server begins shutting down.
    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}
