//! Implements ExpenseSourcePort with the built-in fixed dataset (offline mode).

use crate::domain::DomainError;
use crate::domain::fixtures::fallback_dataset;
use crate::ports::ExpenseSourcePort;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Default)]
pub struct FixedExpenseSource;

#[async_trait::async_trait]
impl ExpenseSourcePort for FixedExpenseSource {
    async fn fetch_expenses(&self) -> Result<Value, DomainError> {
        info!("serving fixed expense dataset");
        Ok(fallback_dataset())
    }
}
