//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AggregateResult, DomainError, ExpenseRecord};
use serde_json::Value;

/// Expense source. Returns the raw expense document (`{"expenses": [...]}`).
#[async_trait::async_trait]
pub trait ExpenseSourcePort: Send + Sync {
    /// Fetch the document. Any transport or decoding failure is an error; callers
    /// decide whether to substitute the fallback dataset.
    async fn fetch_expenses(&self) -> Result<Value, DomainError>;
}

/// Text-generation provider used to describe anomalies in the filtered expenses.
#[async_trait::async_trait]
pub trait EnrichmentPort: Send + Sync {
    /// One request, no retry. Returns the provider's free-text answer.
    async fn analyze_anomalies(&self, items: &[ExpenseRecord]) -> Result<String, DomainError>;
}

/// Where a finished run is written.
#[async_trait::async_trait]
pub trait ResultSinkPort: Send + Sync {
    /// Persist the structured summary. Returns a display name for the saved artifact.
    async fn save_summary(&self, summary: &AggregateResult) -> Result<String, DomainError>;
}
