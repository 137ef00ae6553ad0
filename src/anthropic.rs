//! Anthropic - Claude API provider
//!
//! The one non-OpenAI-compatible wire contract the gateway speaks:
//! `x-api-key` auth plus a version header, system messages split out of
//! the message array, and content returned as typed blocks.

use crate::completion::{ModelRequest, ModelResponse, TokenUsage};
use crate::cost::cost_for;
use crate::error::{Error, Result};
use crate::message::{Message, MessageRole};
use crate::router::ModelProvider;
use crate::util::{mask_api_key, truncate_safe};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Anthropic API version
const API_VERSION: &str = "2023-06-01";

/// Available Anthropic models
pub const MODELS: &[&str] = &[
    // Claude 4.5 family (latest)
    "claude-opus-4-5-20250514",
    "claude-sonnet-4-5-20250929",
    "claude-haiku-4-5-20251001",
    // Claude 3.x family (legacy)
    "claude-3-5-sonnet-20241022",
    "claude-3-opus-20240229",
];

/// Default model
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Sanitize Anthropic API error messages to prevent leaking sensitive information
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
        || lower.contains("x-api-key")
    {
        return "API authentication error. Please check your ANTHROPIC_API_KEY.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") || lower.contains("overloaded") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if error.len() > 300 {
        format!("{}...(truncated)", truncate_safe(error, 300))
    } else {
        error.to_string()
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<ResponseContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    r#type: String,
    message: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Anthropic provider configuration
#[derive(Clone)]
pub struct AnthropicConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Max tokens sent when the request does not cap generation
    /// (the Anthropic API requires an explicit value)
    pub default_max_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AnthropicConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_max_tokens: 4096,
            timeout: Duration::from_secs(60),
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;

        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let default_model =
            std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            default_model,
            default_max_tokens: 4096,
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

    /// Set the default max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
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
// Provider Implementation
// ============================================================================

/// Anthropic Claude provider
pub struct AnthropicProvider {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = AnthropicConfig::from_env()?;
        Self::new(config)
    }

    /// Convert messages to Anthropic format, returning the accumulated
    /// system prompt separately from the conversation array
    fn convert_messages(messages: &[Message]) -> (Option<String>, Vec<AnthropicMessage>) {
        let mut system_parts = Vec::new();
        let mut anthropic_messages = Vec::new();

        for msg in messages {
            match msg.role {
                MessageRole::System => {
                    if !msg.content.is_empty() {
                        system_parts.push(msg.content.clone());
                    }
                }
                MessageRole::User | MessageRole::Assistant => {
                    anthropic_messages.push(AnthropicMessage {
                        role: msg.role.as_str().to_string(),
                        content: msg.content.clone(),
                    });
                }
            }
        }

        let system_message = if !system_parts.is_empty() {
            Some(system_parts.join("\n\n"))
        } else {
            None
        };

        (system_message, anthropic_messages)
    }

    /// Send request to the Anthropic API
    async fn send_request(&self, request: &AnthropicRequest) -> Result<AnthropicResponse> {
        let url = format!("{}/v1/messages", self.config.base_url);

        debug!("Sending request to Anthropic: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
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
            if let Ok(error) = serde_json::from_str::<AnthropicError>(&body) {
                return Err(Error::Api(sanitize_api_error(&format!(
                    "{}: {}",
                    error.error.r#type, error.error.message
                ))));
            }
            return Err(Error::Api(sanitize_api_error(&format!(
                "HTTP {status}: {body}"
            ))));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ModelProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
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

        let (system, messages) = Self::convert_messages(&request.wire_messages());

        let anthropic_request = AnthropicRequest {
            model: model.to_string(),
            max_tokens: request.max_tokens.unwrap_or(self.config.default_max_tokens),
            system,
            messages,
            temperature: request.temperature,
        };

        let started = Instant::now();
        let response = self.send_request(&anthropic_request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let content = response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        let tokens = TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens);
        let cost = cost_for("anthropic", model, &tokens);

        Ok(ModelResponse {
            content,
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
        let config = AnthropicConfig::new("test-key")
            .with_model("claude-haiku-4-5-20251001")
            .with_max_tokens(2048)
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.default_model, "claude-haiku-4-5-20251001");
        assert_eq!(config.default_max_tokens, 2048);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_available_models() {
        assert!(MODELS.contains(&"claude-sonnet-4-5-20250929"));
        assert!(MODELS.contains(&"claude-3-opus-20240229"));
    }

    #[test]
    fn test_message_conversion_splits_system() {
        let messages = vec![
            Message::system("You are helpful"),
            Message::user("Hello"),
            Message::assistant("Hi there!"),
        ];

        let (system, converted) = AnthropicProvider::convert_messages(&messages);

        assert_eq!(system, Some("You are helpful".to_string()));
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].role, "user");
        assert_eq!(converted[1].role, "assistant");
    }

    #[test]
    fn test_message_conversion_joins_system_parts() {
        let messages = vec![
            Message::system("First"),
            Message::system("Second"),
            Message::user("Hello"),
        ];

        let (system, converted) = AnthropicProvider::convert_messages(&messages);
        assert_eq!(system, Some("First\n\nSecond".to_string()));
        assert_eq!(converted.len(), 1);
    }

    #[test]
    fn test_sanitize_api_error() {
        let sanitized = sanitize_api_error("Invalid x-api-key header");
        assert!(!sanitized.contains("x-api-key"));
        assert!(sanitized.contains("ANTHROPIC_API_KEY"));

        let sanitized = sanitize_api_error("overloaded: too many requests");
        assert!(sanitized.contains("rate limit"));
    }

    #[test]
    fn test_config_debug_masks_key() {
        let config = AnthropicConfig::new("sk-ant-REDACTED");
        let debug_str = format!("{:?}", config);

        assert!(!debug_str.contains("1234567890"));
        assert!(debug_str.contains("sk-a...ghij"));
    }

    #[test]
    fn test_content_blocks_deserialize() {
        let body = r#"{
            "id": "msg_1",
            "model": "claude-sonnet-4-5-20250929",
            "content": [{"type": "text", "text": "Hello"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 4}
        }"#;

        let parsed: AnthropicResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.usage.input_tokens, 12);
        assert!(matches!(
            parsed.content[0],
            ResponseContentBlock::Text { .. }
        ));
    }
}
