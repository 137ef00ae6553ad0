//! Routed request and response types
//!
//! This module defines the shapes that cross the router boundary: what a
//! caller submits ([`ModelRequest`]) and what every provider adapter
//! normalizes its answer into ([`ModelResponse`]).

use crate::message::Message;
use crate::router::TaskKind;
use serde::{Deserialize, Serialize};

/// Token usage for a single call
///
/// `total_tokens` is always `input_tokens + output_tokens`; construct via
/// [`TokenUsage::new`] to keep that accounting law intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt/messages
    pub input_tokens: u32,
    /// Tokens generated by the model
    pub output_tokens: u32,
    /// Sum of input and output tokens
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Create a usage record; the total is derived, never supplied
    #[must_use]
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// Estimated cost for a single call (USD)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Cost attributed to input tokens
    pub input_cost: f64,
    /// Cost attributed to output tokens
    pub output_cost: f64,
    /// Sum of input and output cost
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Create a cost breakdown; the total is derived, never supplied
    #[must_use]
    pub fn new(input_cost: f64, output_cost: f64) -> Self {
        Self {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
        }
    }
}

/// A routed completion request
#[derive(Debug, Clone, Default)]
pub struct ModelRequest {
    /// Prompt text; used for heuristic selection and, absent `messages`,
    /// sent as a single user message
    pub prompt: String,
    /// Explicit model id, optionally provider-prefixed (`"xai/grok-3"`)
    pub model: Option<String>,
    /// Task hint used to pick a default model when `model` is unset
    pub task: Option<TaskKind>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Full conversation; overrides `prompt` as the wire payload when set
    pub messages: Option<Vec<Message>>,
}

impl ModelRequest {
    /// Create a request from a bare prompt
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Pin an explicit model id
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the task hint
    #[must_use]
    pub fn with_task(mut self, task: TaskKind) -> Self {
        self.task = Some(task);
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the generation cap
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Supply a full conversation instead of a bare prompt
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// The messages an adapter should put on the wire: the explicit
    /// conversation when present, otherwise the prompt as one user turn
    #[must_use]
    pub fn wire_messages(&self) -> Vec<Message> {
        match &self.messages {
            Some(messages) if !messages.is_empty() => messages.clone(),
            _ => vec![Message::user(self.prompt.clone())],
        }
    }
}

/// Normalized completion response
///
/// Every adapter produces this shape regardless of the provider's own
/// response schema; the router returns it to the caller unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Generated content
    pub content: String,
    /// Model that served the call, as reported by the provider
    pub model: String,
    /// Token accounting
    pub tokens: TokenUsage,
    /// Estimated cost (USD)
    pub cost: CostBreakdown,
    /// Wall-clock latency of the provider exchange
    pub latency_ms: u64,
    /// Reasoning trace, for models that expose one
    pub reasoning: Option<String>,
}
