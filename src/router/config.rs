//! Router configuration
//!
//! An explicit value owned by a [`super::ModelRouter`] instance; there is
//! no shared config singleton. Updates go through
//! [`super::ModelRouter::update_config`].

use super::types::{RoutingStrategy, TaskKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model used when a task has no entry in `default_model_by_task`
pub const LAST_RESORT_MODEL: &str = "deepseek/deepseek-chat";

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Default model per task hint
    pub default_model_by_task: HashMap<TaskKind, String>,
    /// Ordered models tried after the selected one fails
    pub fallback_chain: Vec<String>,
    /// Strategy preference; stored and surfaced, not consulted by
    /// selection (see [`RoutingStrategy`])
    pub routing_strategy: RoutingStrategy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        let mut default_model_by_task = HashMap::new();
        default_model_by_task.insert(TaskKind::Chat, "deepseek/deepseek-chat".to_string());
        default_model_by_task.insert(TaskKind::Code, "deepseek/deepseek-coder".to_string());
        default_model_by_task.insert(TaskKind::Reasoning, "deepseek/deepseek-reasoner".to_string());
        default_model_by_task.insert(TaskKind::Vision, "xai/grok-2-vision-1212".to_string());
        default_model_by_task.insert(
            TaskKind::Rag,
            "anthropic/claude-haiku-4-5-20251001".to_string(),
        );

        Self {
            default_model_by_task,
            fallback_chain: vec![
                "deepseek/deepseek-chat".to_string(),
                "openrouter/meta-llama/llama-3.1-70b-instruct".to_string(),
                "anthropic/claude-haiku-4-5-20251001".to_string(),
            ],
            routing_strategy: RoutingStrategy::Auto,
        }
    }
}

impl RouterConfig {
    /// Override the default model for one task
    #[must_use]
    pub fn with_default_for(mut self, task: TaskKind, model: impl Into<String>) -> Self {
        self.default_model_by_task.insert(task, model.into());
        self
    }

    /// Replace the fallback chain
    #[must_use]
    pub fn with_fallback_chain(mut self, chain: Vec<String>) -> Self {
        self.fallback_chain = chain;
        self
    }

    /// Set the strategy preference
    #[must_use]
    pub fn with_strategy(mut self, strategy: RoutingStrategy) -> Self {
        self.routing_strategy = strategy;
        self
    }

    /// Default model for a task, if configured
    #[must_use]
    pub fn default_for(&self, task: TaskKind) -> Option<&str> {
        self.default_model_by_task.get(&task).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_covers_every_task() {
        let config = RouterConfig::default();
        for task in [
            TaskKind::Chat,
            TaskKind::Code,
            TaskKind::Reasoning,
            TaskKind::Vision,
            TaskKind::Rag,
        ] {
            assert!(config.default_for(task).is_some(), "{task:?}");
        }
        assert!(!config.fallback_chain.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = RouterConfig::default()
            .with_default_for(TaskKind::Code, "anthropic/claude-sonnet-4-5-20250929")
            .with_fallback_chain(vec!["xai/grok-3-mini".to_string()])
            .with_strategy(RoutingStrategy::Cost);

        assert_eq!(
            config.default_for(TaskKind::Code),
            Some("anthropic/claude-sonnet-4-5-20250929")
        );
        assert_eq!(config.fallback_chain, vec!["xai/grok-3-mini".to_string()]);
        assert_eq!(config.routing_strategy, RoutingStrategy::Cost);
    }
}
