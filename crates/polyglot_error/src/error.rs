//! Top-level error wrapper types.

use crate::{ConfigError, FallbackError, ProviderError, ServerError};

/// Every error condition a Polyglot crate can surface.
///
/// # Examples
///
/// ```
/// use polyglot_error::{PolyglotError, ServerError, ServerErrorKind};
///
/// let server_err = ServerError::new(ServerErrorKind::Bind("address in use".to_string()));
/// let err: PolyglotError = server_err.into();
/// assert!(format!("{}", err).contains("address in use"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PolyglotErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Terminal outcome of a fallback run
    #[from(FallbackError)]
    Fallback(FallbackError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Polyglot error with kind discrimination.
///
/// # Examples
///
/// ```
/// use polyglot_error::{PolyglotError, PolyglotErrorKind, PolyglotResult, ConfigError};
///
/// fn might_fail() -> PolyglotResult<()> {
///     Err(ConfigError::invalid("server.bind", "missing"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), PolyglotErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Polyglot Error: {}", _0)]
pub struct PolyglotError(Box<PolyglotErrorKind>);

impl PolyglotError {
    /// Create a new error from a kind.
    pub fn new(kind: PolyglotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PolyglotErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PolyglotErrorKind
impl<T> From<T> for PolyglotError
where
    T: Into<PolyglotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Polyglot operations.
pub type PolyglotResult<T> = std::result::Result<T, PolyglotError>;
