//! ModelGate - multi-provider LLM routing
//!
//! This crate routes completion requests across hosted LLM providers:
//! - Router: provider trait, model selection, and ordered fallback
//! - OpenRouter: multi-vendor gateway (OpenAI, Anthropic, Google, Meta, ...)
//! - DeepSeek: ultra-low-cost chat/code/reasoning models
//! - xAI: Grok family
//! - Anthropic: Claude family
//! - Cost: static pricing table and per-call usage ledger
//!
//! A request names a model explicitly, carries a task hint, or is
//! classified from its prompt text; the router dispatches to the matching
//! provider and walks a configured fallback chain until one answers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod anthropic;
pub mod completion;
pub mod cost;
pub mod deepseek;
pub mod error;
pub mod message;
pub mod openrouter;
pub mod router;
pub mod util;
pub mod xai;

pub use completion::{CostBreakdown, ModelRequest, ModelResponse, TokenUsage};
pub use cost::{cost_for, CostTracker, ModelPricing, UsageRecord, UsageStats};
pub use error::{AttemptFailure, Error, Result};
pub use message::{Message, MessageRole};
pub use router::{
    sniff_task, split_model_id, ModelProvider, ModelRouter, RouterConfig, RoutingStrategy,
    ScriptedProvider, TaskKind,
};

// Re-export provider types
pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use deepseek::{DeepSeekConfig, DeepSeekProvider};
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
pub use xai::{XaiConfig, XaiProvider};
