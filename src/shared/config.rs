//! Application configuration. Expense source, AI credentials, timeouts.

use serde::Deserialize;
use tracing::warn;

/// Default expense source endpoint. Overridden by AC_API_URL.
pub const DEFAULT_SOURCE_URL: &str = "https://sofixaca.vercel.app/api/expenses";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Expense Source Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Expense API URL. Read from OTHER_EXPENSES_SOURCE_URL or AC_API_URL.
    #[serde(default)]
    pub source_url: Option<String>,

    /// Expense API key sent as `x-api-key`. Read from OTHER_EXPENSES_SOURCE_API_KEY or AC_API_KEY.
    #[serde(default)]
    pub source_api_key: Option<String>,

    /// Request timeout for the expense API in seconds (default 10).
    /// Read from OTHER_EXPENSES_SOURCE_TIMEOUT_SECS only.
    #[serde(skip)]
    pub source_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Enrichment Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key. Read from OTHER_EXPENSES_AI_API_KEY or OPENAI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from OTHER_EXPENSES_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-3.5-turbo". Read from OTHER_EXPENSES_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Whole-request timeout for the AI call in seconds (default 30).
    /// Read from OTHER_EXPENSES_AI_TIMEOUT_SECS only.
    #[serde(skip)]
    pub ai_timeout_secs: Option<u64>,

    /// Use the fixed dataset and skip AI enrichment. Read from OTHER_EXPENSES_OFFLINE.
    #[serde(default)]
    pub offline: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("OTHER_EXPENSES"));
        if let Ok(path) = std::env::var("OTHER_EXPENSES_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        cfg.read_timeouts(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Timeouts are skipped by the deserializer and parsed here, so an unparsable
    /// value leaves only that timeout at its default.
    fn read_timeouts(&mut self, var: impl Fn(&str) -> Option<String>) {
        let secs = |key: &str| match var(key).map(|s| s.trim().parse::<u64>()) {
            Some(Ok(n)) => Some(n),
            Some(Err(_)) => {
                warn!(key = %key, "ignoring unparsable timeout");
                None
            }
            None => None,
        };
        self.source_timeout_secs = secs("OTHER_EXPENSES_SOURCE_TIMEOUT_SECS");
        self.ai_timeout_secs = secs("OTHER_EXPENSES_AI_TIMEOUT_SECS");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expense Source Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the expense API URL. AC_API_URL is honored for compatibility.
    pub fn source_url_or_default(&self) -> String {
        self.source_url
            .clone()
            .or_else(|| std::env::var("AC_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string())
    }

    /// Returns the expense API key from config or AC_API_KEY env.
    pub fn source_api_key(&self) -> Option<String> {
        self.source_api_key
            .clone()
            .or_else(|| std::env::var("AC_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    /// Returns the expense API timeout in seconds. Defaults to 10.
    pub fn source_timeout_secs_or_default(&self) -> u64 {
        self.source_timeout_secs.unwrap_or(10)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API key if configured. Reads from config or OPENAI_API_KEY env.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-3.5-turbo".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-3.5-turbo".to_string())
    }

    /// Returns the AI timeout in seconds. Defaults to 30.
    pub fn ai_timeout_secs_or_default(&self) -> u64 {
        self.ai_timeout_secs.unwrap_or(30)
    }

    /// Returns true if AI is configured (API key present) and not running offline.
    pub fn is_ai_configured(&self) -> bool {
        !self.is_offline() && self.ai_api_key().is_some()
    }

    pub fn is_offline(&self) -> bool {
        self.offline.unwrap_or(false)
    }
}
