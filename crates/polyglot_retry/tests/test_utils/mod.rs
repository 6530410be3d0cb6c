//! Test utilities for fallback orchestration tests.
//!
//! Provides a scripted generator, a sleeper that records instead of waiting,
//! and helpers that trip a cancellation token from inside a call.

#![allow(dead_code)]

use async_trait::async_trait;
use polyglot_retry::{CancellationToken, ProviderFailure, Sleeper, TextGenerator};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Scripted = Result<String, ProviderFailure>;

/// Generator that replays a per-model script and logs every call.
///
/// Each model's responses are consumed in order; the final entry repeats once
/// the script runs out. A model with no script fails fatally.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    scripts: Arc<Mutex<HashMap<String, VecDeque<Scripted>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append responses to a model's script.
    pub fn script(self, model: &str, responses: impl IntoIterator<Item = Scripted>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .extend(responses);
        self
    }

    /// Make a model fail the same way on every call.
    pub fn always_fail(self, model: &str, message: &str) -> Self {
        self.script(model, [Err(ProviderFailure::new(message))])
    }

    /// Make a model succeed with `text` on every call.
    pub fn always_ok(self, model: &str, text: &str) -> Self {
        self.script(model, [Ok(text.to_string())])
    }

    /// Models called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, model: &str, _prompt: &str) -> Result<String, ProviderFailure> {
        self.calls.lock().unwrap().push(model.to_string());

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(model) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(ProviderFailure::new(format!("no script for {model}"))),
        }
    }
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

/// Sleeper that cancels the token and then never wakes.
#[derive(Debug, Clone)]
pub struct CancellingSleeper {
    pub token: CancellationToken,
}

#[async_trait]
impl Sleeper for CancellingSleeper {
    async fn sleep(&self, _delay: Duration) {
        self.token.cancel();
        std::future::pending::<()>().await;
    }
}

/// Generator that cancels the token on the given call and then hangs.
///
/// Calls before that one fail retryably.
#[derive(Debug, Clone)]
pub struct CancellingGenerator {
    pub token: CancellationToken,
    pub cancel_on_call: usize,
    calls: Arc<Mutex<usize>>,
}

impl CancellingGenerator {
    pub fn new(token: CancellationToken, cancel_on_call: usize) -> Self {
        Self {
            token,
            cancel_on_call,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextGenerator for CancellingGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, ProviderFailure> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call < self.cancel_on_call {
            return Err(ProviderFailure::with_status(429, "rate limit"));
        }
        self.token.cancel();
        std::future::pending::<()>().await;
        Ok(String::new())
    }
}
