//! Retryable vs. fatal classification of provider failures.

use polyglot_error::ProviderError;

/// Status codes that mean "try another model".
const RETRYABLE_STATUS_CODES: [u16; 2] = [429, 503];

/// Lowercase message fragments that mean "try another model".
///
/// Covers the numeric codes as they appear inside error text, the generic
/// HTTP phrases, and the Google API status names for the same conditions.
const RETRYABLE_TOKENS: &[&str] = &[
    "429",
    "503",
    "rate limit",
    "too many requests",
    "resource_exhausted",
    "resource has been exhausted",
    "overload",
    "unavailable",
];

/// Provider error reduced to what the classifier needs.
///
/// Provider adapters convert their own error types into this shape at the
/// boundary, so classification never depends on a particular client crate.
///
/// # Examples
///
/// ```
/// use polyglot_retry::ProviderFailure;
///
/// let failure = ProviderFailure::with_status(503, "The model is overloaded.");
/// assert_eq!(failure.status_code, Some(503));
/// assert_eq!(failure.to_string(), "The model is overloaded.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
#[display("{}", message)]
pub struct ProviderFailure {
    /// HTTP status reported by the provider, when one could be recovered
    pub status_code: Option<u16>,
    /// Provider message, surfaced verbatim to callers on terminal failure
    pub message: String,
}

impl ProviderFailure {
    /// A failure with a message and no status code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
        }
    }

    /// A failure with both a status code and a message.
    pub fn with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Classify this failure. See [`classify`].
    pub fn class(&self) -> FailureClass {
        classify(self)
    }
}

impl From<ProviderError> for ProviderFailure {
    fn from(err: ProviderError) -> Self {
        Self {
            status_code: err.kind.status_code(),
            message: err.kind.to_string(),
        }
    }
}

/// Whether a failure permits trying the next model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FailureClass {
    /// Rate limiting or transient overload: advance to the next model
    #[display("retryable")]
    Retryable,
    /// Anything else: abort the run
    #[display("fatal")]
    Fatal,
}

/// Classify a provider failure.
///
/// A failure is [`FailureClass::Retryable`] iff its status code is 429 or 503,
/// or its message (case-insensitively) contains a rate-limit or overload token.
/// Everything else is [`FailureClass::Fatal`].
///
/// # Examples
///
/// ```
/// use polyglot_retry::{classify, FailureClass, ProviderFailure};
///
/// assert_eq!(classify(&ProviderFailure::new("429 rate limit")), FailureClass::Retryable);
/// assert_eq!(classify(&ProviderFailure::new("invalid API key")), FailureClass::Fatal);
/// ```
pub fn classify(failure: &ProviderFailure) -> FailureClass {
    if failure
        .status_code
        .is_some_and(|code| RETRYABLE_STATUS_CODES.contains(&code))
    {
        return FailureClass::Retryable;
    }

    let message = failure.message.to_lowercase();
    if RETRYABLE_TOKENS.iter().any(|token| message.contains(token)) {
        FailureClass::Retryable
    } else {
        FailureClass::Fatal
    }
}
