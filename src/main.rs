//! Wiring & DI. Entry point: bootstrap adapters, inject into services, print the outcome.
//! No business logic here; the run is delegated to ReportService.

use dotenv::dotenv;
use other_expenses::adapters::ai::OpenAiAdapter;
use other_expenses::adapters::persistence::JsonFileSink;
use other_expenses::adapters::source::{FixedExpenseSource, HttpExpenseSource};
use other_expenses::adapters::ui::{Marker, present_outcome, print_status};
use other_expenses::ports::{EnrichmentPort, ExpenseSourcePort, ResultSinkPort};
use other_expenses::shared::config::AppConfig;
use other_expenses::usecases::{EnrichmentService, ExpensePipeline, ReportService};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Expense source ---
    let source: Arc<dyn ExpenseSourcePort> = if cfg.is_offline() {
        info!("offline mode: using fixed expense dataset");
        Arc::new(FixedExpenseSource)
    } else {
        Arc::new(
            HttpExpenseSource::new(
                cfg.source_url_or_default(),
                cfg.source_api_key(),
                Duration::from_secs(cfg.source_timeout_secs_or_default()),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    };

    // --- AI enrichment (optional) ---
    let provider: Option<Arc<dyn EnrichmentPort>> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "AI enrichment enabled with OpenAI adapter"
        );
        Some(Arc::new(
            OpenAiAdapter::new(
                cfg.ai_api_url_or_default(),
                cfg.ai_api_key().unwrap_or_default(),
                cfg.ai_model_or_default(),
                Duration::from_secs(cfg.ai_timeout_secs_or_default()),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        ))
    } else {
        warn!("OPENAI_API_KEY not set, anomaly narrative will use the offline template");
        None
    };

    // --- Result sink (fixed file name in the working directory) ---
    let sink: Arc<dyn ResultSinkPort> = Arc::new(JsonFileSink::in_dir(&cwd));

    let service = ReportService::new(
        source,
        ExpensePipeline::new(EnrichmentService::new(provider)),
        sink,
    );

    print_status(Marker::Start, "Fetching data from AC API...");
    let (raw, used_fallback_data) = service.fetch_or_fallback().await;
    print_status(Marker::Processing, "Processing expenses...");
    let outcome = service.process(raw, used_fallback_data).await;
    if outcome.used_fallback_data {
        info!("report built from the fixed expense dataset");
    }

    present_outcome(&outcome);

    Ok(if outcome.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
