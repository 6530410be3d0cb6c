//! Core data types for the Polyglot tutoring relay.
//!
//! This crate holds the request and reply shapes exchanged with HTTP clients,
//! the conversation history they carry, and the tutor prompt renderer that
//! turns both into the single prompt string sent to a model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod prompt;
mod role;

pub use chat::{ChatReply, ChatRequest, ChatRequestBuilder, ChatTurn, ErrorBody};
pub use prompt::{DEFAULT_TUTOR_TEMPLATE, TutorPrompt};
pub use role::Role;
