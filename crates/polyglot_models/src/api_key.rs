//! Provider credentials.

use polyglot_error::{ProviderError, ProviderErrorKind};
use tracing::debug;

/// Environment variable the relay reads its key from by default.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

/// Older variable name, consulted when the configured one is unset.
pub const LEGACY_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// An API key that never prints its value.
///
/// # Examples
///
/// ```
/// use polyglot_models::ApiKey;
///
/// let key = ApiKey::new("AIza-secret");
/// assert_eq!(key.to_string(), "[redacted]");
/// assert_eq!(key.expose(), "AIza-secret");
/// ```
#[derive(Clone, PartialEq, Eq, derive_more::Display)]
#[display("[redacted]")]
pub struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([redacted])")
    }
}

impl ApiKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from `var`, falling back to [`LEGACY_API_KEY_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::MissingApiKey`] naming `var` when neither
    /// variable holds a non-blank value.
    pub fn from_env(var: &str) -> Result<Self, ProviderError> {
        Self::from_env_vars(&[var, LEGACY_API_KEY_ENV])
    }

    /// Read the key from the first of `vars` that holds a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::MissingApiKey`] naming the first variable.
    pub fn from_env_vars(vars: &[&str]) -> Result<Self, ProviderError> {
        for var in vars {
            match std::env::var(var) {
                Ok(value) if !value.trim().is_empty() => {
                    debug!(var, "Loaded API key from environment");
                    return Ok(Self(value.trim().to_string()));
                }
                _ => {}
            }
        }
        let primary = vars.first().copied().unwrap_or(DEFAULT_API_KEY_ENV);
        Err(ProviderError::new(ProviderErrorKind::MissingApiKey(
            primary.to_string(),
        )))
    }

    /// The raw key, for handing to a client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}
