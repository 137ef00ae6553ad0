//! Model pricing - static per-model cost information
//!
//! Pricing is keyed by the fully qualified `"provider/model"` id. Lookup
//! misses fall back to a default rate instead of failing; unknown models
//! are therefore priced as if mid-range, which understates cost for
//! premium models absent from the table.

use crate::completion::{CostBreakdown, TokenUsage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default cost per 1M input tokens (USD) for unknown models
pub const DEFAULT_INPUT_COST_PER_MILLION: f64 = 5.0;

/// Default cost per 1M output tokens (USD) for unknown models
pub const DEFAULT_OUTPUT_COST_PER_MILLION: f64 = 15.0;

/// Pricing information for a model (per 1M tokens)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Model name (provider-local id)
    pub model: String,
    /// Provider name
    pub provider: String,
    /// Cost per 1M input tokens (USD)
    pub input_cost_per_million: f64,
    /// Cost per 1M output tokens (USD)
    pub output_cost_per_million: f64,
    /// Context window size
    pub context_window: u32,
}

impl ModelPricing {
    /// Calculate cost for the given token usage
    #[must_use]
    pub fn calculate_cost(&self, usage: &TokenUsage) -> CostBreakdown {
        CostBreakdown::new(
            (usage.input_tokens as f64 / 1_000_000.0) * self.input_cost_per_million,
            (usage.output_tokens as f64 / 1_000_000.0) * self.output_cost_per_million,
        )
    }
}

static PRICING: LazyLock<HashMap<String, ModelPricing>> = LazyLock::new(default_pricing);

/// Compute cost for a call, falling back to default rates when the
/// `"provider/model"` key is not in the table
#[must_use]
pub fn cost_for(provider: &str, model: &str, usage: &TokenUsage) -> CostBreakdown {
    match PRICING.get(&format!("{provider}/{model}")) {
        Some(pricing) => pricing.calculate_cost(usage),
        None => CostBreakdown::new(
            (usage.input_tokens as f64 / 1_000_000.0) * DEFAULT_INPUT_COST_PER_MILLION,
            (usage.output_tokens as f64 / 1_000_000.0) * DEFAULT_OUTPUT_COST_PER_MILLION,
        ),
    }
}

/// Look up the pricing entry for a model, if known
#[must_use]
pub fn pricing_for(provider: &str, model: &str) -> Option<&'static ModelPricing> {
    PRICING.get(&format!("{provider}/{model}"))
}

fn entry(
    pricing: &mut HashMap<String, ModelPricing>,
    provider: &str,
    model: &str,
    input_cost_per_million: f64,
    output_cost_per_million: f64,
    context_window: u32,
) {
    pricing.insert(
        format!("{provider}/{model}"),
        ModelPricing {
            model: model.to_string(),
            provider: provider.to_string(),
            input_cost_per_million,
            output_cost_per_million,
            context_window,
        },
    );
}

/// Pricing table for the models the gateway routes to (2026 list prices)
#[must_use]
pub fn default_pricing() -> HashMap<String, ModelPricing> {
    let mut pricing = HashMap::new();

    // ========================================================================
    // DeepSeek (ultra-low-cost)
    // ========================================================================
    entry(&mut pricing, "deepseek", "deepseek-chat", 0.14, 0.28, 64_000);
    entry(&mut pricing, "deepseek", "deepseek-coder", 0.14, 0.28, 64_000);
    entry(
        &mut pricing,
        "deepseek",
        "deepseek-reasoner",
        0.55,
        2.19,
        64_000,
    );

    // ========================================================================
    // Anthropic Claude 4.5 family
    // ========================================================================
    entry(
        &mut pricing,
        "anthropic",
        "claude-opus-4-5-20250514",
        5.00,
        25.00,
        200_000,
    );
    entry(
        &mut pricing,
        "anthropic",
        "claude-sonnet-4-5-20250929",
        3.00,
        15.00,
        200_000,
    );
    entry(
        &mut pricing,
        "anthropic",
        "claude-haiku-4-5-20251001",
        1.00,
        5.00,
        200_000,
    );

    // Legacy Claude 3.x (still routable)
    entry(
        &mut pricing,
        "anthropic",
        "claude-3-5-sonnet-20241022",
        3.00,
        15.00,
        200_000,
    );
    entry(
        &mut pricing,
        "anthropic",
        "claude-3-opus-20240229",
        15.00,
        75.00,
        200_000,
    );

    // ========================================================================
    // xAI Grok family
    // ========================================================================
    entry(&mut pricing, "xai", "grok-3", 3.00, 15.00, 131_072);
    entry(&mut pricing, "xai", "grok-3-mini", 0.30, 0.50, 131_072);
    entry(
        &mut pricing,
        "xai",
        "grok-2-vision-1212",
        2.00,
        10.00,
        32_768,
    );
    entry(&mut pricing, "xai", "grok-2-1212", 2.00, 10.00, 131_072);

    // ========================================================================
    // OpenRouter (vendor-qualified ids pass through the gateway)
    // ========================================================================
    entry(
        &mut pricing,
        "openrouter",
        "meta-llama/llama-3.1-70b-instruct",
        0.59,
        0.79,
        128_000,
    );
    entry(
        &mut pricing,
        "openrouter",
        "openai/gpt-4o-mini",
        0.15,
        0.60,
        128_000,
    );
    entry(
        &mut pricing,
        "openrouter",
        "anthropic/claude-3.5-sonnet",
        3.00,
        15.00,
        200_000,
    );
    entry(
        &mut pricing,
        "openrouter",
        "google/gemini-flash-1.5",
        0.075,
        0.30,
        1_000_000,
    );
    entry(
        &mut pricing,
        "openrouter",
        "mistralai/mistral-large",
        2.00,
        6.00,
        128_000,
    );

    pricing
}
