//! Model router implementation
//!
//! Selection is explicit-model first, then the task default, then prompt
//! heuristics; dispatch walks the selected model plus the configured
//! fallback chain until one provider answers.

use super::config::{RouterConfig, LAST_RESORT_MODEL};
use super::provider::ModelProvider;
use super::rules::{sniff_task, split_model_id};
use crate::completion::{ModelRequest, ModelResponse};
use crate::cost::CostTracker;
use crate::error::{AttemptFailure, Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Router over the registered provider adapters
pub struct ModelRouter {
    providers: HashMap<String, Arc<dyn ModelProvider>>,
    config: RouterConfig,
    tracker: CostTracker,
}

impl ModelRouter {
    /// Create a router with the given configuration and no providers
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self {
            providers: HashMap::new(),
            config,
            tracker: CostTracker::new(),
        }
    }

    /// Create a router with default configuration, registering every
    /// provider whose API key is present in the environment
    #[must_use]
    pub fn from_env() -> Self {
        let mut router = Self::new(RouterConfig::default());

        if let Ok(provider) = crate::openrouter::OpenRouterProvider::from_env() {
            router.register("openrouter", Arc::new(provider));
        }
        if let Ok(provider) = crate::deepseek::DeepSeekProvider::from_env() {
            router.register("deepseek", Arc::new(provider));
        }
        if let Ok(provider) = crate::xai::XaiProvider::from_env() {
            router.register("xai", Arc::new(provider));
        }
        if let Ok(provider) = crate::anthropic::AnthropicProvider::from_env() {
            router.register("anthropic", Arc::new(provider));
        }

        router
    }

    /// Register a provider
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn ModelProvider>) {
        let name = name.into();
        debug!(provider = %name, "Registering provider");
        self.providers.insert(name, provider);
    }

    /// Get a provider by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ModelProvider>> {
        self.providers.get(name).cloned()
    }

    /// Check if a provider is registered
    #[must_use]
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// List registered provider names
    #[must_use]
    pub fn list_providers(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Every model the registered providers advertise, provider-qualified
    #[must_use]
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self
            .providers
            .iter()
            .flat_map(|(name, provider)| {
                provider
                    .available_models()
                    .into_iter()
                    .map(move |model| format!("{name}/{model}"))
            })
            .collect();
        models.sort();
        models
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn update_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// The usage ledger fed by this router
    #[must_use]
    pub fn tracker(&self) -> &CostTracker {
        &self.tracker
    }

    /// Select a model for a request without dispatching it
    ///
    /// Explicit model wins; then the task default; then heuristics over
    /// the prompt text.
    #[must_use]
    pub fn select_model(&self, request: &ModelRequest) -> String {
        if let Some(model) = &request.model {
            return model.clone();
        }

        if let Some(task) = request.task {
            if let Some(model) = self.config.default_for(task) {
                return model.to_string();
            }
        }

        let task = sniff_task(&request.prompt);
        self.config
            .default_for(task)
            .unwrap_or(LAST_RESORT_MODEL)
            .to_string()
    }

    /// Selected model followed by the fallback chain, de-duplicated
    /// preserving order
    fn candidates(&self, selected: &str) -> Vec<String> {
        let mut chain: Vec<String> = std::iter::once(selected.to_string())
            .chain(self.config.fallback_chain.iter().cloned())
            .collect();
        let mut seen = HashSet::new();
        chain.retain(|model| seen.insert(model.clone()));
        chain
    }

    /// Route a request: select a model, dispatch, and fall back through
    /// the configured chain on failure
    ///
    /// Returns the first successful adapter response unmodified. When
    /// every candidate fails, the error carries one `{model, cause}`
    /// entry per attempt.
    #[instrument(skip(self, request))]
    pub async fn route(&self, request: ModelRequest) -> Result<ModelResponse> {
        let selected = self.select_model(&request);
        let candidates = self.candidates(&selected);
        let mut attempts: Vec<AttemptFailure> = Vec::new();

        for candidate in &candidates {
            let (provider_name, model) = split_model_id(candidate);

            let Some(provider) = self.get(provider_name) else {
                warn!(model = %candidate, provider = provider_name, "Provider not registered, advancing fallback");
                attempts.push(AttemptFailure {
                    model: candidate.clone(),
                    cause: Box::new(Error::NotConfigured(provider_name.to_string())),
                });
                continue;
            };

            debug!(model = %candidate, provider = provider_name, "Dispatching");

            match provider.complete(model, &request).await {
                Ok(response) => {
                    if !attempts.is_empty() {
                        info!(
                            selected = %selected,
                            served_by = %candidate,
                            failed_attempts = attempts.len(),
                            "Fallback succeeded"
                        );
                    }
                    self.tracker
                        .record_usage(
                            provider_name,
                            model,
                            &response.tokens,
                            &response.cost,
                            response.latency_ms,
                            true,
                        )
                        .await;
                    return Ok(response);
                }
                Err(error) => {
                    warn!(model = %candidate, error = %error, "Attempt failed, advancing fallback");
                    self.tracker
                        .record_usage(
                            provider_name,
                            model,
                            &Default::default(),
                            &Default::default(),
                            0,
                            false,
                        )
                        .await;
                    attempts.push(AttemptFailure {
                        model: candidate.clone(),
                        cause: Box::new(error),
                    });
                }
            }
        }

        Err(Error::Exhausted(attempts))
    }
}
