#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use fitai_chat::routes::create_router;
use fitai_chat::services::provider::{ChatProvider, ProviderError, ProviderReply, Turn};
use fitai_chat::state::{AppState, SharedState};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    NoText,
    Error(String),
}

/// One recorded call: the history the provider saw and the new message.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub history: Vec<Turn>,
    pub message: String,
}

/// Provider that replays queued responses and records every call.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Text(text.into()))
    }

    pub fn with_no_text(self) -> Self {
        self.push(MockResponse::NoText)
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(MockResponse::Error(message.into()))
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn send_message(
        &self,
        history: &[Turn],
        message: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            history: history.to_vec(),
            message: message.to_string(),
        });

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Text("Mock response".to_string()));

        match next {
            MockResponse::Text(text) => Ok(ProviderReply { text: Some(text) }),
            MockResponse::NoText => Ok(ProviderReply { text: None }),
            MockResponse::Error(message) => Err(ProviderError::Api { status: 503, message }),
        }
    }
}

/// Router wired to `provider`, plus the state behind it.
pub fn test_app(provider: MockProvider) -> (Router, SharedState) {
    let state = Arc::new(AppState::new(Arc::new(provider), Duration::from_secs(60)));
    let app = create_router().with_state(state.clone());
    (app, state)
}
