//! DeepSeek - ultra-low-cost LLM provider
//!
//! OpenAI-compatible API. The reasoner model additionally returns a
//! `reasoning_content` trace, surfaced on the normalized response.

use crate::completion::{ModelRequest, ModelResponse, TokenUsage};
use crate::cost::cost_for;
use crate::error::{Error, Result};
use crate::message::Message;
use crate::router::ModelProvider;
use crate::util::{mask_api_key, truncate_safe};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// DeepSeek API base URL
pub const BASE_URL: &str = "https://api.deepseek.com/v1";

/// Available DeepSeek models
pub const MODELS: &[&str] = &["deepseek-chat", "deepseek-coder", "deepseek-reasoner"];

/// Default DeepSeek model (V3 chat - best balance)
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Sanitize API error messages
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your DEEPSEEK_API_KEY.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "DeepSeek rate limit exceeded. Please try again later.".to_string();
    }

    if error.len() > 300 {
        format!("{}...(truncated)", truncate_safe(error, 300))
    } else {
        error.to_string()
    }
}

/// DeepSeek provider configuration
#[derive(Clone)]
pub struct DeepSeekConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for DeepSeekConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DeepSeekConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120), // DeepSeek can be slower
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .map_err(|_| Error::NotConfigured("DEEPSEEK_API_KEY not set".to_string()))?;

        let base_url =
            std::env::var("DEEPSEEK_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());
        let default_model =
            std::env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            default_model,
            timeout: Duration::from_secs(120),
        })
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// API Types (OpenAI compatible with reasoning extension)
// ============================================================================

#[derive(Debug, Serialize)]
struct DeepSeekRequest {
    model: String,
    messages: Vec<DeepSeekMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct DeepSeekMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct DeepSeekResponse {
    id: String,
    model: String,
    choices: Vec<DeepSeekChoice>,
    usage: Option<DeepSeekUsage>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct DeepSeekChoice {
    index: u32,
    message: DeepSeekResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepSeekResponseMessage {
    content: String,
    /// Chain-of-thought trace returned by deepseek-reasoner
    reasoning_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepSeekUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct DeepSeekError {
    error: DeepSeekErrorDetail,
}

#[derive(Debug, Deserialize)]
struct DeepSeekErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// DeepSeek provider
pub struct DeepSeekProvider {
    client: Client,
    config: DeepSeekConfig,
}

impl DeepSeekProvider {
    /// Create a new DeepSeek provider
    pub fn new(config: DeepSeekConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = DeepSeekConfig::from_env()?;
        Self::new(config)
    }

    fn convert_message(msg: &Message) -> DeepSeekMessage {
        DeepSeekMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }

    /// Send request to the DeepSeek API
    async fn send_request(&self, request: &DeepSeekRequest) -> Result<DeepSeekResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!("Sending request to DeepSeek: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(Error::RateLimit);
            }
            let message = serde_json::from_str::<DeepSeekError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
            return Err(Error::Api(sanitize_api_error(&message)));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ModelProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "deepseek"
    }

    fn available_models(&self) -> Vec<String> {
        MODELS.iter().map(|s| (*s).to_string()).collect()
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %model))]
    async fn complete(&self, model: &str, request: &ModelRequest) -> Result<ModelResponse> {
        let model = if model.is_empty() {
            self.config.default_model.as_str()
        } else {
            model
        };

        let messages: Vec<DeepSeekMessage> = request
            .wire_messages()
            .iter()
            .map(Self::convert_message)
            .collect();

        let deepseek_request = DeepSeekRequest {
            model: model.to_string(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let started = Instant::now();
        let response = self.send_request(&deepseek_request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        let tokens = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();
        let cost = cost_for("deepseek", model, &tokens);

        Ok(ModelResponse {
            content: choice.message.content,
            model: response.model,
            tokens,
            cost,
            latency_ms,
            reasoning: choice.message.reasoning_content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DeepSeekConfig::new("test-key").with_model("deepseek-reasoner");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.default_model, "deepseek-reasoner");
    }

    #[test]
    fn test_available_models() {
        assert!(MODELS.contains(&"deepseek-chat"));
        assert!(MODELS.contains(&"deepseek-reasoner"));
    }

    #[test]
    fn test_reasoning_content_deserializes() {
        let body = r#"{
            "id": "1",
            "model": "deepseek-reasoner",
            "choices": [{
                "index": 0,
                "message": {
                    "content": "42",
                    "reasoning_content": "thinking it through"
                },
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 7, "completion_tokens": 3}
        }"#;

        let parsed: DeepSeekResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.reasoning_content.as_deref(),
            Some("thinking it through")
        );
    }
}
