//! Enrichment service. One attempt at an AI narrative, then the offline template.

use crate::domain::report::fallback_narrative;
use crate::domain::{BucketTotals, ExpenseRecord, Narrative, NarrativeSource};
use crate::ports::EnrichmentPort;
use std::sync::Arc;
use tracing::{info, warn};

/// Wraps an optional provider. `None` means no credential was configured.
pub struct EnrichmentService {
    provider: Option<Arc<dyn EnrichmentPort>>,
}

impl EnrichmentService {
    pub fn new(provider: Option<Arc<dyn EnrichmentPort>>) -> Self {
        Self { provider }
    }

    /// Never calls out; every narrative is the template.
    pub fn offline() -> Self {
        Self { provider: None }
    }

    /// Ask the provider once. On any failure, or with no provider, build the
    /// narrative from `totals` alone.
    pub async fn narrative(&self, items: &[ExpenseRecord], totals: &BucketTotals) -> Narrative {
        if let Some(provider) = &self.provider {
            match provider.analyze_anomalies(items).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(items = items.len(), len = text.len(), "AI narrative received");
                    return Narrative {
                        text,
                        source: NarrativeSource::Provider,
                    };
                }
                Ok(_) => warn!("AI provider returned an empty narrative, using fallback"),
                Err(e) => warn!(error = %e, "AI enrichment unavailable, using fallback"),
            }
        } else {
            info!("no AI provider configured, using fallback narrative");
        }

        Narrative {
            text: fallback_narrative(totals),
            source: NarrativeSource::Fallback,
        }
    }
}
