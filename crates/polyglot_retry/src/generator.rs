//! The outbound seam to a model provider.

use crate::ProviderFailure;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces a complete text response from a named model.
///
/// Implementations select the model by identifier, make a single non-streaming
/// call, and report failures as a [`ProviderFailure`] so the orchestrator can
/// classify them.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` using `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        (**self).generate(model, prompt).await
    }
}
