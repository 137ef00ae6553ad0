//! Cost tracking - pricing and usage bookkeeping
//!
//! # Module Structure
//!
//! - `pricing`: static model pricing table and cost computation
//! - `record`: usage records and statistics types
//! - `tracker`: in-memory usage ledger

mod pricing;
mod record;
mod tracker;


pub use pricing::{
    cost_for, default_pricing, pricing_for, ModelPricing, DEFAULT_INPUT_COST_PER_MILLION,
    DEFAULT_OUTPUT_COST_PER_MILLION,
};
pub use record::{ProviderStats, UsageRecord, UsageStats};
pub use tracker::CostTracker;
