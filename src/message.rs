// src/message.rs
use serde::{Deserialize, Serialize};

/// Header carrying the caller's conversation id in both directions.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}

impl ChatRequest {
    /// The trimmed question, if one was actually asked.
    pub fn question(&self) -> Option<&str> {
        self.question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}
