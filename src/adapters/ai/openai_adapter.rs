//! OpenAI-compatible adapter for anomaly narratives.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `EnrichmentPort`: one chat-completions call per run, plain-text answer.

use crate::domain::{DomainError, ExpenseRecord};
use crate::ports::EnrichmentPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible AI adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-3.5-turbo", "llama3.2")
    /// * `timeout` - Whole-request timeout; the only bound on the call
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("AI HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    /// Build the anomaly prompt. Items are embedded as pretty JSON with their
    /// original amount representation.
    fn anomaly_prompt(items: &[ExpenseRecord]) -> Result<String, DomainError> {
        let expense_summary = serde_json::to_string_pretty(items)
            .map_err(|e| DomainError::Enrichment(format!("serialize expenses: {}", e)))?;
        Ok(format!(
            "Analyze these expenses for anomalies: {}",
            expense_summary
        ))
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait::async_trait]
impl EnrichmentPort for OpenAiAdapter {
    async fn analyze_anomalies(&self, items: &[ExpenseRecord]) -> Result<String, DomainError> {
        let prompt = Self::anomaly_prompt(items)?;
        info!(
            items = items.len(),
            prompt_len = prompt.len(),
            model = %self.model,
            "sending expenses to AI for anomaly analysis"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Enrichment(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Enrichment(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            DomainError::Enrichment(format!("Failed to parse API response: {}", e))
        })?;

        let narrative = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| DomainError::Enrichment("No response content returned".to_string()))?;

        debug!(narrative_len = narrative.len(), "received AI narrative");

        Ok(narrative)
    }
}
