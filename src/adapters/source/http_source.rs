//! Implements ExpenseSourcePort over HTTP.
//!
//! GET `{url}` with an optional `x-api-key` header; the body must be JSON.

use crate::domain::DomainError;
use crate::ports::ExpenseSourcePort;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// HTTP expense source (e.g. the AC expenses API).
pub struct HttpExpenseSource {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpExpenseSource {
    pub fn new(
        url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("source HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait::async_trait]
impl ExpenseSourcePort for HttpExpenseSource {
    async fn fetch_expenses(&self) -> Result<Value, DomainError> {
        info!(url = %self.url, "fetching expenses");

        let mut request = self.client.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Source(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "expense source returned error");
            return Err(DomainError::Source(format!("API error {}", status)));
        }

        let doc: Value = response
            .json()
            .await
            .map_err(|e| DomainError::Source(format!("Failed to parse expenses JSON: {}", e)))?;

        let count = doc
            .get("expenses")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        info!(count, "expenses fetched");
        Ok(doc)
    }
}
