//! Speaker roles in a tutoring conversation.

use serde::{Deserialize, Serialize};

/// Who spoke a turn of the conversation.
///
/// Clients send free-form role strings. `"user"` is the student; every other
/// value is treated as the tutor, so histories produced by different front
/// ends (`"model"`, `"assistant"`, `"bot"`) all render the same way. A `null`
/// or non-string role is also the tutor.
///
/// # Examples
///
/// ```
/// use polyglot_core::Role;
///
/// assert_eq!(Role::from("user".to_string()), Role::Student);
/// assert_eq!(Role::from("model".to_string()), Role::Tutor);
///
/// // Display is the transcript label
/// assert_eq!(format!("{}", Role::Student), "Student");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(from = "RawRole", into = "String")]
pub enum Role {
    /// The learner asking questions
    Student,
    /// The model answering them
    #[default]
    Tutor,
}

/// Any JSON value accepted in the `role` position.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRole {
    Name(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawRole> for Role {
    fn from(raw: RawRole) -> Self {
        match raw {
            RawRole::Name(name) => Role::from(name),
            RawRole::Other(_) => Role::Tutor,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        if raw == "user" {
            Role::Student
        } else {
            Role::Tutor
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => "user".to_string(),
            Role::Tutor => "model".to_string(),
        }
    }
}
