//! Mock AI adapter for testing without API calls.
//!
//! Returns a fixed narrative or a fixed failure and counts how often it was asked.

use crate::domain::{DomainError, ExpenseRecord};
use crate::ports::EnrichmentPort;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Mock enrichment provider.
pub struct MockEnrichmentAdapter {
    /// `None` simulates an unreachable provider.
    reply: Option<String>,
    calls: AtomicUsize,
}

impl MockEnrichmentAdapter {
    /// Answers every request with `reply`.
    pub fn succeeding(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EnrichmentPort for MockEnrichmentAdapter {
    async fn analyze_anomalies(&self, items: &[ExpenseRecord]) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(items = items.len(), "[MOCK] Simulating AI anomaly analysis");

        self.reply
            .clone()
            .ok_or_else(|| DomainError::Enrichment("[MOCK] provider unreachable".to_string()))
    }
}
