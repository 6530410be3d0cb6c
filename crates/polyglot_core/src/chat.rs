//! Request and reply types for the chat endpoint.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One earlier turn of the conversation, supplied by the client.
///
/// # Examples
///
/// ```
/// use polyglot_core::{ChatTurn, Role};
///
/// let turn: ChatTurn = serde_json::from_str(r#"{"role":"user","text":"Bonjour"}"#).unwrap();
/// assert_eq!(turn.role, Role::Student);
/// assert_eq!(turn.text, "Bonjour");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke; a missing role means the tutor
    #[serde(default)]
    pub role: Role,
    /// What they said
    pub text: String,
}

impl ChatTurn {
    /// A turn spoken by the student.
    pub fn student(text: impl Into<String>) -> Self {
        Self {
            role: Role::Student,
            text: text.into(),
        }
    }

    /// A turn spoken by the tutor.
    pub fn tutor(text: impl Into<String>) -> Self {
        Self {
            role: Role::Tutor,
            text: text.into(),
        }
    }
}

/// Body of a chat request.
///
/// The history is optional on the wire and defaults to empty; the server never
/// stores it, so clients resend the full history on every call.
///
/// # Examples
///
/// ```
/// use polyglot_core::{ChatRequest, ChatRequestBuilder, ChatTurn};
///
/// let request = ChatRequestBuilder::default()
///     .prompt("What does 'amare' mean?")
///     .history(vec![ChatTurn::student("Hallo"), ChatTurn::tutor("Hallo! Wie kann ich helfen?")])
///     .build()
///     .unwrap();
/// assert_eq!(request.history().len(), 2);
///
/// let minimal: ChatRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).unwrap();
/// assert!(minimal.history().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// The student's current message
    prompt: String,
    /// Earlier turns, oldest first
    #[serde(default)]
    #[builder(default)]
    history: Vec<ChatTurn>,
}

/// Successful reply body: `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Generated tutor text
    pub text: String,
}

/// Error reply body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure message
    pub error: String,
}

impl ErrorBody {
    /// Create an error body from any message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
