//! HTTP composer backend implementation.
//!
//! Talks to an Ollama-style chat endpoint. The store bounds each
//! personalization call with its own timeout and falls back to token
//! substitution on failure, so errors here surface as
//! [`Error::Personalization`] and go no further.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use relata_core::{defaults, Error, PersonalizeRequest, Personalizer, Result};

use crate::prompt::{personalization_prompt, PERSONALIZE_SYSTEM_PROMPT};

/// Default composer endpoint.
pub const DEFAULT_COMPOSER_URL: &str = defaults::COMPOSER_URL;

/// Default generation model.
pub const DEFAULT_COMPOSER_MODEL: &str = defaults::COMPOSER_MODEL;

/// HTTP-backed message composer.
pub struct HttpComposerBackend {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl HttpComposerBackend {
    /// Create a backend with default settings.
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_COMPOSER_URL.to_string(),
            DEFAULT_COMPOSER_MODEL.to_string(),
        )
    }

    /// Create a backend with custom endpoint and model.
    pub fn with_config(base_url: String, model: String) -> Self {
        let timeout_secs = std::env::var("RELATA_COMPOSER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::COMPOSER_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing composer backend: url={}, model={}",
            base_url, model
        );

        Self {
            client,
            base_url,
            model,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("RELATA_COMPOSER_URL")
            .unwrap_or_else(|_| DEFAULT_COMPOSER_URL.to_string());
        let model = std::env::var("RELATA_COMPOSER_MODEL")
            .unwrap_or_else(|_| DEFAULT_COMPOSER_MODEL.to_string());
        Self::with_config(base_url, model)
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Personalization(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Personalization(format!(
                "Composer returned {}: {}",
                status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Personalization(format!("Failed to parse response: {}", e)))?;

        let content = result.message.content;
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            message_len = content.len(),
            duration_ms = elapsed,
            "Personalization complete"
        );
        if elapsed > 10_000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow personalization call"
            );
        }
        Ok(content)
    }
}

impl Default for HttpComposerBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Personalizer for HttpComposerBackend {
    async fn personalize(&self, req: PersonalizeRequest) -> Result<String> {
        let prompt = personalization_prompt(&req);
        let message = self.generate(PERSONALIZE_SYSTEM_PROMPT, &prompt).await?;
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(Error::Personalization(
                "composer returned an empty message".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Chat API message for `/api/chat`.
#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Request payload for the chat endpoint.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Response from the chat endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}
