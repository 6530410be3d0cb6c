//! Test utilities for router and configuration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use polyglot_core::TutorPrompt;
use polyglot_retry::{
    BackoffSchedule, CancellationToken, FallbackConfig, ProviderFailure, TextGenerator,
};
use polyglot_server::{AppState, ChatOrchestrator};
use std::sync::{Arc, Mutex};

/// How the mock answers every call.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this text
    Reply(String),
    /// Fail with this failure
    Fail(ProviderFailure),
}

/// Generator that answers every model the same way and keeps the prompts it saw.
#[derive(Debug)]
pub struct MockGenerator {
    behavior: MockBehavior,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockGenerator {
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(MockBehavior::Reply(text.to_string()))
    }

    pub fn failing(failure: ProviderFailure) -> Arc<Self> {
        Self::new(MockBehavior::Fail(failure))
    }

    /// `(model, prompt)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        self.prompts
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        match &self.behavior {
            MockBehavior::Reply(text) => Ok(text.clone()),
            MockBehavior::Fail(failure) => Err(failure.clone()),
        }
    }
}

/// Two models, two passes, no backoff delay.
pub fn fast_config() -> FallbackConfig {
    FallbackConfig::new(["model-a", "model-b"], 2, BackoffSchedule::None).unwrap()
}

/// Handler state around `generator` with a short template.
pub fn state_with(generator: Arc<MockGenerator>, shutdown: CancellationToken) -> AppState {
    let generator: Arc<dyn TextGenerator> = generator;
    let orchestrator = ChatOrchestrator::new(generator, &fast_config()).unwrap();
    AppState::new(orchestrator, TutorPrompt::new("Instruction: be kind."), shutdown)
}
