// src/config.rs
use std::{net::SocketAddr, time::Duration};

use secrecy::Secret;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

pub const TEMPERATURE: f32 = 0.5;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Settings sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Process configuration, validated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    api_key: Secret<String>,
    chat_role: String,
    chat_model: String,
    bind_address: SocketAddr,
    gemini_base_url: String,
    session_ttl: Duration,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let api_key = Secret::new(required("API_KEY")?);
        let chat_role = required("CHAT_ROLE")?;
        let chat_model = required("CHAT_MODEL")?;

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDRESS",
                reason: e.to_string(),
            })?;

        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| e.to_string())
                .and_then(|secs| match secs {
                    0 => Err("must be at least one second".to_string()),
                    secs => Ok(Duration::from_secs(secs)),
                })
                .map_err(|reason| ConfigError::Invalid {
                    name: "SESSION_TTL_SECS",
                    reason,
                })?,
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        Ok(Self {
            api_key,
            chat_role,
            chat_model,
            bind_address,
            gemini_base_url,
            session_ttl,
        })
    }

    pub fn api_key(&self) -> &Secret<String> {
        &self.api_key
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.chat_model.clone(),
            system_instruction: self.chat_role.clone(),
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}
