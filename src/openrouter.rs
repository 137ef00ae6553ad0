//! OpenRouter - multi-provider LLM gateway
//!
//! Single OpenAI-compatible API fronting many vendors; model ids stay
//! vendor-qualified (`"meta-llama/llama-3.1-70b-instruct"`).

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

/// OpenRouter API base URL
pub const BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Popular OpenRouter models (subset)
pub const MODELS: &[&str] = &[
    "meta-llama/llama-3.1-70b-instruct",
    "openai/gpt-4o-mini",
    "anthropic/claude-3.5-sonnet",
    "google/gemini-flash-1.5",
    "mistralai/mistral-large",
];

/// Default model
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-70b-instruct";

/// Sanitize API error messages
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your OPENROUTER_API_KEY.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "OpenRouter rate limit exceeded. Please try again later.".to_string();
    }

    if error.len() > 300 {
        format!("{}...(truncated)", truncate_safe(error, 300))
    } else {
        error.to_string()
    }
}

/// OpenRouter provider configuration
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Request timeout
    pub timeout: Duration,
    /// App name (for OpenRouter analytics)
    pub app_name: Option<String>,
    /// Site URL (for OpenRouter analytics)
    pub site_url: Option<String>,
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl OpenRouterConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120), // Longer timeout for routing
            app_name: Some("ModelGate".to_string()),
            site_url: None,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| Error::NotConfigured("OPENROUTER_API_KEY not set".to_string()))?;

        let base_url =
            std::env::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());
        let default_model =
            std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            default_model,
            timeout: Duration::from_secs(120),
            app_name: std::env::var("OPENROUTER_APP_NAME").ok(),
            site_url: std::env::var("OPENROUTER_SITE_URL").ok(),
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

    /// Set the app name
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the site URL
    #[must_use]
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into());
        self
    }
}

// ============================================================================
// API Types (OpenAI compatible)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenRouterRequest {
    model: String,
    messages: Vec<OpenRouterMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenRouterMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct OpenRouterResponse {
    id: String,
    model: String,
    choices: Vec<OpenRouterChoice>,
    usage: Option<OpenRouterUsage>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct OpenRouterChoice {
    index: u32,
    message: OpenRouterMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenRouterUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenRouterError {
    error: OpenRouterErrorDetail,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct OpenRouterErrorDetail {
    message: String,
    code: Option<i32>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenRouter provider
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenRouterConfig::from_env()?;
        Self::new(config)
    }

    fn convert_message(msg: &Message) -> OpenRouterMessage {
        OpenRouterMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }

    /// Send request to the OpenRouter API
    async fn send_request(&self, request: &OpenRouterRequest) -> Result<OpenRouterResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!("Sending request to OpenRouter: {}", url);

        let mut builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter analytics headers
        if let Some(app_name) = &self.config.app_name {
            builder = builder.header("X-Title", app_name);
        }
        if let Some(site_url) = &self.config.site_url {
            builder = builder.header("HTTP-Referer", site_url);
        }

        let response = builder
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
            let message = serde_json::from_str::<OpenRouterError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
            return Err(Error::Api(sanitize_api_error(&message)));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ModelProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
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

        let messages: Vec<OpenRouterMessage> = request
            .wire_messages()
            .iter()
            .map(Self::convert_message)
            .collect();

        let openrouter_request = OpenRouterRequest {
            model: model.to_string(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let started = Instant::now();
        let response = self.send_request(&openrouter_request).await?;
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
        let cost = cost_for("openrouter", model, &tokens);

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
        let config = OpenRouterConfig::new("test-key")
            .with_model("openai/gpt-4o-mini")
            .with_app_name("TestApp")
            .with_site_url("https://example.com");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.default_model, "openai/gpt-4o-mini");
        assert_eq!(config.app_name, Some("TestApp".to_string()));
        assert_eq!(config.site_url, Some("https://example.com".to_string()));
    }

    #[test]
    fn test_available_models_stay_vendor_qualified() {
        for model in MODELS {
            assert!(model.contains('/'), "{model}");
        }
    }

    #[test]
    fn test_convert_message() {
        let msg = Message::assistant("Hello!");
        let converted = OpenRouterProvider::convert_message(&msg);
        assert_eq!(converted.role, "assistant");
        assert_eq!(converted.content, "Hello!");
    }

    #[test]
    fn test_api_key_masking() {
        let config = OpenRouterConfig::new("sk-or-1234567890abcdefghij");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("1234567890"));
    }
}
