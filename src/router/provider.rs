//! Provider trait definition
//!
//! This module defines the core trait that all provider adapters implement.

use crate::completion::{ModelRequest, ModelResponse};
use crate::error::Result;

/// Trait for provider adapters
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    /// Get the provider name (registry key and model-id prefix)
    fn name(&self) -> &str;

    /// Get available models (provider-local ids)
    fn available_models(&self) -> Vec<String>;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Run one completion against the given provider-local model id
    ///
    /// A single request, no retry; retry lives in the router's fallback
    /// walk.
    async fn complete(&self, model: &str, request: &ModelRequest) -> Result<ModelResponse>;
}
