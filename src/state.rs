// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::page::PageOptions;
use crate::services::provider::ChatProvider;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub provider: Arc<dyn ChatProvider>,
    pub page: PageOptions,
}

impl AppState {
    pub fn new(provider: Arc<dyn ChatProvider>, session_ttl: Duration) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl),
            provider,
            page: PageOptions::default(),
        }
    }
}
