// src/services/gemini.rs
//! Google Gemini `generateContent` client.
//!
//! The REST API is stateless: every call carries the system instruction,
//! the full conversation so far and the generation settings.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::provider::{ChatProvider, ProviderError, ProviderReply, Turn};
use crate::config::{Config, GenerationSettings};

#[derive(Debug)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: Secret<String>,
    settings: GenerationSettings,
}

impl GeminiProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Secret<String>,
        settings: GenerationSettings,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            settings,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(
            config.gemini_base_url(),
            config.api_key().clone(),
            config.generation(),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.settings.model
        )
    }

    fn build_request<'a>(&'a self, history: &'a [Turn], message: &'a str) -> GenerateContentRequest<'a> {
        let mut contents: Vec<Content<'a>> = history
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.as_str()),
                parts: vec![Part { text: &turn.text }],
            })
            .collect();
        contents.push(Content {
            role: Some("user"),
            parts: vec![Part { text: message }],
        });

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &self.settings.system_instruction }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn send_message(
        &self,
        history: &[Turn],
        message: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let body = self.build_request(history, message);
        tracing::debug!(model = %self.settings.model, turns = body.contents.len(), "calling generateContent");

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let raw = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(ProviderReply { text: parsed.text() })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate joined together, skipping thoughts.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let mut texts = parts
            .iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text.as_deref())
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GenerationSettings {
        GenerationSettings {
            model: "gemini-test".to_string(),
            system_instruction: "Be a coach.".to_string(),
            temperature: 0.5,
            max_output_tokens: 1024,
        }
    }

    #[test]
    fn request_carries_history_and_settings() {
        let provider = GeminiProvider::new("http://localhost/", Secret::new("k".to_string()), settings()).unwrap();
        let history = vec![Turn::user("hi"), Turn::model("hello")];
        let body = serde_json::to_value(provider.build_request(&history, "plan?")).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be a coach.");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"].as_array().unwrap().len(), 3);
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][2]["role"], "user");
        assert_eq!(body["contents"][2]["parts"][0]["text"], "plan?");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(
            provider.endpoint(),
            "http://localhost/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let provider =
            GeminiProvider::new("http://localhost", Secret::new("sk-live-1".to_string()), settings())
                .unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("sk-live-1"));
        assert!(debug.contains("gemini-test"));
    }

    #[test]
    fn text_joins_parts_and_skips_thoughts() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[
                {"text":"thinking...","thought":true},
                {"text":"Squats, "},
                {"text":"then lunges."}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Squats, then lunges."));
    }

    #[test]
    fn text_is_absent_without_candidates_or_text_parts() {
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(blocked.text(), None);

        let no_text: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(no_text.text(), None);

        let no_content: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#).unwrap();
        assert_eq!(no_content.text(), None);
    }
}
