//! Scripted provider for testing
//!
//! Returns queued outcomes in order and records every model it was asked
//! for, so tests can assert on attempt order and de-duplication.

use super::provider::ModelProvider;
use crate::completion::{CostBreakdown, ModelRequest, ModelResponse, TokenUsage};
use crate::error::{Error, Result};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A scripted provider that pops queued outcomes and logs calls.
pub struct ScriptedProvider {
    name: String,
    outcomes: Mutex<VecDeque<Result<ModelResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    /// Create a scripted provider registered under `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Mutex::new(VecDeque::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful response with the given content
    pub fn push_ok(&self, content: impl Into<String>) {
        let content = content.into();
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(ModelResponse {
                content,
                model: "scripted-model".to_string(),
                tokens: TokenUsage::new(10, 5),
                cost: CostBreakdown::default(),
                latency_ms: 1,
                reasoning: None,
            }));
    }

    /// Queue a failure
    pub fn push_err(&self, error: Error) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Models this provider was asked for, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl ModelProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn available_models(&self) -> Vec<String> {
        vec!["scripted-model".to_string()]
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, model: &str, _request: &ModelRequest) -> Result<ModelResponse> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(model.to_string());

        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match outcome {
            Some(Ok(mut response)) => {
                response.model = model.to_string();
                Ok(response)
            }
            Some(Err(error)) => Err(error),
            // Queue empty: succeed by default
            None => Ok(ModelResponse {
                content: "scripted response".to_string(),
                model: model.to_string(),
                tokens: TokenUsage::new(10, 5),
                cost: CostBreakdown::default(),
                latency_ms: 1,
                reasoning: None,
            }),
        }
    }
}
