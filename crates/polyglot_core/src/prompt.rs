//! Tutor prompt rendering.
//!
//! The model sees one flat prompt per call:
//!
//! ```text
//! <instruction template>
//!
//! ### CONVERSATION SO FAR ###      (only when history is non-empty)
//! Student: "..."
//! Tutor: "..."
//!
//! ### CURRENT MESSAGE ###
//! Student: "<prompt>"
//! Tutor:
//! ```

use crate::{ChatRequest, ChatTurn, Role};
use std::fmt::Write as _;
use tracing::{debug, instrument};

/// Instruction template shipped with the crate.
pub const DEFAULT_TUTOR_TEMPLATE: &str = include_str!("../prompts/language_tutor.txt");

/// Renders chat requests into complete model prompts.
///
/// # Examples
///
/// ```
/// use polyglot_core::{ChatTurn, TutorPrompt};
///
/// let prompt = TutorPrompt::new("Instruction: be brief.");
/// let rendered = prompt.render("Was heißt 'amare'?", &[ChatTurn::student("Hallo")]);
///
/// assert!(rendered.contains("### CONVERSATION SO FAR ###"));
/// assert!(rendered.ends_with("Student: \"Was heißt 'amare'?\"\nTutor:"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct TutorPrompt {
    /// Instruction block placed before the conversation
    template: String,
}

impl Default for TutorPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_TUTOR_TEMPLATE)
    }
}

impl TutorPrompt {
    /// Create a renderer around an instruction template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the transcript block for earlier turns.
    ///
    /// Returns an empty string for an empty history.
    pub fn render_history(history: &[ChatTurn]) -> String {
        if history.is_empty() {
            return String::new();
        }

        let mut transcript = String::from("\n### CONVERSATION SO FAR ###\n");
        for turn in history {
            let label = match turn.role {
                Role::Student => "Student",
                Role::Tutor => "Tutor",
            };
            // Writing into a String cannot fail.
            let _ = writeln!(transcript, "{}: \"{}\"", label, turn.text);
        }
        transcript.push('\n');
        transcript
    }

    /// Render the full prompt for a student message and its history.
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub fn render(&self, prompt: &str, history: &[ChatTurn]) -> String {
        let transcript = Self::render_history(history);
        let rendered = format!(
            "\n{}\n{}\n### CURRENT MESSAGE ###\nStudent: \"{}\"\nTutor:",
            self.template.trim_end(),
            transcript,
            prompt
        );
        debug!(chars = rendered.len(), "Rendered tutor prompt");
        rendered
    }

    /// Render the full prompt for a chat request.
    pub fn render_request(&self, request: &ChatRequest) -> String {
        self.render(request.prompt(), request.history())
    }
}
