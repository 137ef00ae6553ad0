//! Cost tracker - in-memory usage ledger
//!
//! Owned by the router instance that feeds it; there is no process-wide
//! tracker singleton.

use super::record::{ProviderStats, UsageRecord, UsageStats};
use crate::completion::{CostBreakdown, TokenUsage};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Maximum records to keep in memory by default
const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Cost tracker for monitoring routed LLM usage
#[derive(Debug)]
pub struct CostTracker {
    /// Usage records, oldest first
    records: RwLock<Vec<UsageRecord>>,
    /// Record ID counter
    next_id: AtomicU64,
    /// Maximum records to keep in memory
    max_records: usize,
}

impl Default for CostTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CostTracker {
    /// Create a new cost tracker
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    /// Create with custom max records
    #[must_use]
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Record a usage event
    pub async fn record_usage(
        &self,
        provider: &str,
        model: &str,
        usage: &TokenUsage,
        cost: &CostBreakdown,
        latency_ms: u64,
        success: bool,
    ) -> UsageRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let record = UsageRecord {
            id,
            timestamp: Utc::now(),
            provider: provider.to_string(),
            model: model.to_string(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            estimated_cost: cost.total_cost,
            latency_ms,
            success,
        };

        let mut records = self.records.write().await;
        records.push(record.clone());

        // Trim old records if needed
        if records.len() > self.max_records {
            let drain_count = records.len() - self.max_records;
            records.drain(0..drain_count);
        }

        record
    }

    /// Get the most recent `count` records, newest first
    pub async fn recent(&self, count: usize) -> Vec<UsageRecord> {
        let records = self.records.read().await;
        records.iter().rev().take(count).cloned().collect()
    }

    /// Aggregate statistics over all retained records
    pub async fn usage_stats(&self) -> UsageStats {
        let records = self.records.read().await;
        let mut stats = UsageStats::default();
        let mut latency_total: u64 = 0;

        for record in records.iter() {
            stats.total_requests += 1;
            if record.success {
                stats.successful_requests += 1;
                latency_total += record.latency_ms;
            } else {
                stats.failed_requests += 1;
            }
            stats.total_input_tokens += u64::from(record.input_tokens);
            stats.total_output_tokens += u64::from(record.output_tokens);
            stats.total_cost += record.estimated_cost;

            let provider = stats
                .by_provider
                .entry(record.provider.clone())
                .or_insert_with(ProviderStats::default);
            provider.requests += 1;
            provider.total_tokens +=
                u64::from(record.input_tokens) + u64::from(record.output_tokens);
            provider.total_cost += record.estimated_cost;
        }

        if stats.successful_requests > 0 {
            stats.avg_latency_ms = latency_total as f64 / stats.successful_requests as f64;
        }

        stats
    }
}
