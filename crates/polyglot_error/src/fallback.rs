//! Terminal outcomes of a model fallback run.

/// Message surfaced when a failure carries no text of its own.
pub const EXHAUSTED_FALLBACK_MESSAGE: &str =
    "I am a little tired, please try again in 10 seconds.";

/// Ways a fallback run can end without producing text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FallbackErrorKind {
    /// A non-retryable provider error aborted the run
    #[display("Fatal error from {}: {}", model, message)]
    Fatal {
        /// Model that produced the error
        model: String,
        /// Status code reported by the provider, if any
        status_code: Option<u16>,
        /// Provider message
        message: String,
    },
    /// Every model failed retryably in every pass
    #[display("All models exhausted after {} attempts: {}", attempts, message)]
    Exhausted {
        /// Number of `generate` invocations made
        attempts: usize,
        /// Status code of the last retryable error, if any
        status_code: Option<u16>,
        /// Message of the last retryable error
        message: String,
    },
    /// The run was cancelled before it resolved
    #[display("Cancelled after {} attempts", attempts)]
    Cancelled {
        /// Number of `generate` invocations started
        attempts: usize,
    },
}

/// Fallback error with source location tracking.
///
/// # Examples
///
/// ```
/// use polyglot_error::{FallbackError, FallbackErrorKind, EXHAUSTED_FALLBACK_MESSAGE};
///
/// let err = FallbackError::new(FallbackErrorKind::Exhausted {
///     attempts: 6,
///     status_code: Some(503),
///     message: String::new(),
/// });
/// assert_eq!(err.user_message(), EXHAUSTED_FALLBACK_MESSAGE);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fallback Error: {} at line {} in {}", kind, line, file)]
pub struct FallbackError {
    /// The kind of error that occurred
    pub kind: FallbackErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FallbackError {
    /// Create a new FallbackError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FallbackErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Message suitable for returning to the end user.
    ///
    /// Provider messages pass through verbatim; an empty message is replaced by
    /// [`EXHAUSTED_FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> &str {
        let message = match &self.kind {
            FallbackErrorKind::Fatal { message, .. }
            | FallbackErrorKind::Exhausted { message, .. } => message.as_str(),
            FallbackErrorKind::Cancelled { .. } => "Request cancelled",
        };
        if message.trim().is_empty() {
            EXHAUSTED_FALLBACK_MESSAGE
        } else {
            message
        }
    }

    /// Whether the run ended through cancellation rather than a provider failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, FallbackErrorKind::Cancelled { .. })
    }
}
