//! Router - provider abstraction and model routing
//!
//! This module defines the provider trait, the routing configuration,
//! and the router that walks the fallback chain.
//!
//! # Module Structure
//!
//! - `types`: core types (TaskKind, RoutingStrategy)
//! - `rules`: selection heuristics and model-id resolution
//! - `config`: router configuration
//! - `provider`: ModelProvider trait definition
//! - `mock`: scripted provider for testing
//! - `router_impl`: ModelRouter implementation

mod config;
mod mock;
mod provider;
mod router_impl;
mod rules;
mod types;

#[cfg(test)]
mod tests;

// Re-export request/response types alongside the router
pub use crate::completion::{CostBreakdown, ModelRequest, ModelResponse, TokenUsage};
pub use crate::message::{Message, MessageRole};

pub use config::{RouterConfig, LAST_RESORT_MODEL};
pub use mock::ScriptedProvider;
pub use provider::ModelProvider;
pub use router_impl::ModelRouter;
pub use rules::{sniff_task, split_model_id, RAG_PROMPT_THRESHOLD};
pub use types::{RoutingStrategy, TaskKind};
