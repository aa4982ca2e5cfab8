use serde::{Deserialize, Serialize};

/// Per-interaction state handed to a skill.
///
/// Owned by the caller (the prompt loop or an HTTP handler) for the
/// duration of one request. History is append-only and maintained by
/// the caller; skills receive a shared reference and cannot mutate it.
/// Nothing here survives a process restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    /// Prior conversation turns, oldest first.
    pub history: Vec<String>,
    /// The free-text input for the current turn.
    pub input: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            history: Vec::new(),
            input: input.into(),
        }
    }

    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    /// The conversation so far as a newline-joined transcript.
    pub fn transcript(&self) -> String {
        self.history.join("\n")
    }
}
