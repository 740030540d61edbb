// src/services/provider.rs
use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message of a conversation as the provider sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// What came back from the provider. `text` is `None` when the reply had
/// no text parts at all (blocked prompt, empty candidate list, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderReply {
    pub text: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("could not decode provider reply: {0}")]
    Decode(String),
}

/// A generative-AI backend able to continue a conversation.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send `message` as the next user turn after `history`.
    async fn send_message(
        &self,
        history: &[Turn],
        message: &str,
    ) -> Result<ProviderReply, ProviderError>;
}
