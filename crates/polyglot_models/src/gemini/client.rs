//! Google Generative Language API adapter.
//!
//! [`GeminiGenerator`] keeps one `gemini_rust::Gemini` client per model,
//! created lazily on first use, and turns client errors into [`ProviderError`]s
//! with the HTTP status recovered from the error text when present.

use async_trait::async_trait;
use gemini_rust::{Gemini, client::Model};
use polyglot_error::{ProviderError, ProviderErrorKind};
use polyglot_retry::{ProviderFailure, TextGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument, warn};

use crate::{ApiKey, ModelMetrics};

const PROVIDER: &str = "gemini";

/// Text generation against the Google Generative Language API.
///
/// # Architecture
///
/// - **Client Pool**: `HashMap<String, Gemini>` keyed by model identifier
/// - **Lazy Creation**: a client is built on the first request for its model
/// - **Thread-Safe**: `Arc<Mutex<..>>`, held only while looking up or inserting
#[derive(Clone)]
pub struct GeminiGenerator {
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    api_key: ApiKey,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.clients.lock().map(|clients| clients.len()).unwrap_or(0);
        f.debug_struct("GeminiGenerator")
            .field("cached_clients", &cached)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Create a generator with an explicit key.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
        }
    }

    /// Create a generator with the key read from `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::MissingApiKey`] if no key is set.
    #[instrument(name = "gemini_generator_from_env")]
    pub fn from_env(api_key_env: &str) -> Result<Self, ProviderError> {
        Ok(Self::new(ApiKey::from_env(api_key_env)?))
    }

    /// Map a model identifier to the client crate's model selector.
    ///
    /// Known Gemini names map to their variants; anything else becomes
    /// `Model::Custom` with the `models/` prefix the API expects.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Get the pooled client for `model`, creating it if needed.
    fn client_for(&self, model: &str) -> Result<Gemini, ProviderError> {
        let mut clients = self.clients.lock().map_err(|e| {
            ProviderError::new(ProviderErrorKind::PoolPoisoned(e.to_string()))
        })?;

        if let Some(client) = clients.get(model) {
            return Ok(client.clone());
        }

        debug!(model, "Creating client");
        let client = Gemini::with_model(self.api_key.expose(), Self::model_name_to_enum(model))
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::ClientCreation {
                    model: model.to_string(),
                    message: e.to_string(),
                })
            })?;
        clients.insert(model.to_string(), client.clone());
        Ok(client)
    }

    /// Send `prompt` as a single user message and return the complete reply.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::HttpError`] when the failure text carries a
    /// status code, [`ProviderErrorKind::ApiRequest`] otherwise, and
    /// [`ProviderErrorKind::EmptyResponse`] when the model answered with no text.
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len()))]
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let client = self.client_for(model)?;
        let metrics = ModelMetrics::get();
        let started = Instant::now();

        let response = match client
            .generate_content()
            .with_user_message(prompt)
            .execute()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err = parse_gemini_error(err);
                warn!(model, error = %err.kind, "Generation request failed");
                metrics.record_error(PROVIDER, model, &ProviderFailure::from(err.clone()));
                return Err(err);
            }
        };

        metrics.record_request(PROVIDER, model, started.elapsed().as_secs_f64());

        let text = response.text();
        if text.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse(
                model.to_string(),
            )));
        }
        debug!(model, response_chars = text.len(), "Generation succeeded");
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderFailure> {
        self.generate_text(model, prompt)
            .await
            .map_err(ProviderFailure::from)
    }
}

/// Convert a client error into a [`ProviderError`], keeping the status code
/// when the error text carries one.
fn parse_gemini_error(err: impl std::fmt::Display) -> ProviderError {
    let message = err.to_string();

    // "bad response from server; code 503; description: ..."
    match extract_status_code(&message) {
        Some(status_code) => ProviderError::new(ProviderErrorKind::HttpError {
            status_code,
            message,
        }),
        None => ProviderError::new(ProviderErrorKind::ApiRequest(message)),
    }
}

/// Pull the number following `code ` out of an error message.
fn extract_status_code(message: &str) -> Option<u16> {
    let (_, rest) = message.split_once("code ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
