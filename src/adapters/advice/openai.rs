//! OpenAI Advice Generator - chat completions for gap coaching.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIAdviceConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_temperature(0.6)
//!     .with_max_tokens(180);
//!
//! let generator = OpenAIAdviceGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompt::{AdvicePrompt, COACH_SYSTEM_PROMPT};
use crate::ports::{AdviceError, AdviceGenerator, AdviceRequest};

/// Configuration for the OpenAI advice generator.
#[derive(Debug, Clone)]
pub struct OpenAIAdviceConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl OpenAIAdviceConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.6,
            max_tokens: 180,
            timeout: Duration::from_secs(20),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Advice generator backed by OpenAI chat completions.
pub struct OpenAIAdviceGenerator {
    config: OpenAIAdviceConfig,
    client: Client,
}

impl OpenAIAdviceGenerator {
    /// Creates a generator with its own HTTP client.
    pub fn new(config: OpenAIAdviceConfig) -> Result<Self, AdviceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdviceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, request: &AdviceRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: COACH_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: AdvicePrompt::build(request),
                },
            ],
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, AdviceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(AdviceError::AuthenticationFailed),
            429 => Err(AdviceError::RateLimited),
            code => Err(AdviceError::Provider {
                status: code,
                message: body,
            }),
        }
    }
}

#[async_trait]
impl AdviceGenerator for OpenAIAdviceGenerator {
    async fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&self.to_openai_request(request))
            .send()
            .await
            .map_err(|e| AdviceError::Network(e.to_string()))?;

        let response = Self::handle_response_status(response).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdviceError::Parse(format!("Failed to parse response: {}", e)))?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
