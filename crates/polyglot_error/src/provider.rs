//! Model provider error types.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// API key not found in environment
    #[display("API key not found (set {})", _0)]
    MissingApiKey(String),
    /// Failed to create a client for a model
    #[display("Failed to create client for {}: {}", model, message)]
    ClientCreation {
        /// Model the client was requested for
        model: String,
        /// Underlying client error
        message: String,
    },
    /// API request failed without a recognizable status code
    #[display("{}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("{}", message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The model answered with no text at all
    #[display("Model {} returned an empty response", _0)]
    EmptyResponse(String),
    /// The client pool lock was poisoned by a panicking thread
    #[display("Client pool poisoned: {}", _0)]
    PoolPoisoned(String),
}

impl ProviderErrorKind {
    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderErrorKind::HttpError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Provider error with source location tracking.
///
/// The `Display` output of the kind is the provider's own message, so it can be
/// surfaced to callers verbatim.
///
/// # Examples
///
/// ```
/// use polyglot_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::HttpError {
///     status_code: 429,
///     message: "Resource has been exhausted".to_string(),
/// });
/// assert_eq!(err.kind.status_code(), Some(429));
/// assert_eq!(err.kind.to_string(), "Resource has been exhausted");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
