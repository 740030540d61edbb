// src/services/mod.rs
pub mod chat;
pub mod gemini;
pub mod provider;
pub mod session_manager;
