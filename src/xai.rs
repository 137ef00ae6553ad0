//! xAI - Grok API provider
//!
//! OpenAI-compatible chat completions API at `api.x.ai`.

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

/// xAI API base URL
pub const BASE_URL: &str = "https://api.x.ai/v1";

/// Available xAI models
pub const MODELS: &[&str] = &[
    "grok-3",
    "grok-3-mini",
    "grok-2-1212",
    "grok-2-vision-1212",
];

/// Default model
pub const DEFAULT_MODEL: &str = "grok-3";

/// Sanitize API error messages
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your XAI_API_KEY.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "xAI rate limit exceeded. Please try again later.".to_string();
    }

    if error.len() > 300 {
        format!("{}...(truncated)", truncate_safe(error, 300))
    } else {
        error.to_string()
    }
}

/// xAI provider configuration
#[derive(Clone)]
pub struct XaiConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for XaiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XaiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl XaiConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("XAI_API_KEY")
            .map_err(|_| Error::NotConfigured("XAI_API_KEY not set".to_string()))?;

        let base_url = std::env::var("XAI_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());
        let default_model =
            std::env::var("XAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            default_model,
            timeout: Duration::from_secs(60),
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
// API Types (OpenAI compatible)
// ============================================================================

#[derive(Debug, Serialize)]
struct XaiRequest {
    model: String,
    messages: Vec<XaiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XaiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct XaiResponse {
    id: String,
    model: String,
    choices: Vec<XaiChoice>,
    usage: Option<XaiUsage>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct XaiChoice {
    index: u32,
    message: XaiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XaiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct XaiError {
    error: XaiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct XaiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// xAI Grok provider
pub struct XaiProvider {
    client: Client,
    config: XaiConfig,
}

impl XaiProvider {
    /// Create a new xAI provider
    pub fn new(config: XaiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = XaiConfig::from_env()?;
        Self::new(config)
    }

    fn convert_message(msg: &Message) -> XaiMessage {
        XaiMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }

    /// Send request to the xAI API
    async fn send_request(&self, request: &XaiRequest) -> Result<XaiResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!("Sending request to xAI: {}", url);

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
            let message = serde_json::from_str::<XaiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
            return Err(Error::Api(sanitize_api_error(&message)));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ModelProvider for XaiProvider {
    fn name(&self) -> &str {
        "xai"
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

        let messages: Vec<XaiMessage> = request
            .wire_messages()
            .iter()
            .map(Self::convert_message)
            .collect();

        let xai_request = XaiRequest {
            model: model.to_string(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let started = Instant::now();
        let response = self.send_request(&xai_request).await?;
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
        let cost = cost_for("xai", model, &tokens);

        Ok(ModelResponse {
            content: choice.message.content,
            model: response.model,
            tokens,
            cost,
            latency_ms,
            reasoning: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = XaiConfig::new("test-key")
            .with_model("grok-3-mini")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.default_model, "grok-3-mini");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_available_models() {
        assert!(MODELS.contains(&"grok-3"));
        assert!(MODELS.contains(&"grok-2-vision-1212"));
    }

    #[test]
    fn test_config_debug_masks_key() {
        let config = XaiConfig::new("xai-1234567890abcdefghij");
        let debug_str = format!("{:?}", config);

        assert!(!debug_str.contains("1234567890"));
        assert!(debug_str.contains("xai-...ghij"));
    }

    #[test]
    fn test_sanitize_api_error() {
        let sanitized = sanitize_api_error("Invalid API key supplied");
        assert!(!sanitized.contains("Invalid"));
        assert!(sanitized.contains("XAI_API_KEY"));
    }
}
