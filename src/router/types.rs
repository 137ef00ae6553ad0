//! Core types for model routing

use serde::{Deserialize, Serialize};

/// Task hint for default-model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// General conversation
    Chat,
    /// Code generation and modification
    Code,
    /// Multi-step reasoning
    Reasoning,
    /// Image understanding
    Vision,
    /// Retrieval-augmented / long-context answering
    Rag,
}

impl TaskKind {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Code => "code",
            Self::Reasoning => "reasoning",
            Self::Vision => "vision",
            Self::Rag => "rag",
        }
    }
}

/// Routing strategy preference
///
/// Carried in [`super::RouterConfig`] and surfaced to callers, but the
/// selector does not consult it: selection is explicit-model, then task
/// default, then prompt heuristics, regardless of strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Prefer the cheapest capable model
    Cost,
    /// Prefer the lowest-latency model
    Speed,
    /// Prefer the most capable model
    Quality,
    /// Let the gateway decide
    #[default]
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_as_str() {
        assert_eq!(TaskKind::Chat.as_str(), "chat");
        assert_eq!(TaskKind::Code.as_str(), "code");
        assert_eq!(TaskKind::Reasoning.as_str(), "reasoning");
        assert_eq!(TaskKind::Vision.as_str(), "vision");
        assert_eq!(TaskKind::Rag.as_str(), "rag");
    }

    #[test]
    fn test_routing_strategy_default() {
        assert_eq!(RoutingStrategy::default(), RoutingStrategy::Auto);
    }

    #[test]
    fn test_task_kind_serde_snake_case() {
        let json = serde_json::to_string(&TaskKind::Rag).unwrap();
        assert_eq!(json, "\"rag\"");
        let parsed: TaskKind = serde_json::from_str("\"code\"").unwrap();
        assert_eq!(parsed, TaskKind::Code);
    }
}
