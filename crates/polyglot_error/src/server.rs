//! Error types for the HTTP front end.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Could not bind the listening socket
    #[display("Failed to bind listener: {}", _0)]
    Bind(String),

    /// The server loop stopped with an I/O error
    #[display("Server terminated: {}", _0)]
    Serve(String),

    /// Failed to read the prompt template
    #[display("Failed to load prompt template: {}", _0)]
    Template(String),

    /// The tracing subscriber could not be installed
    #[display("Failed to initialize logging: {}", _0)]
    Logging(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
