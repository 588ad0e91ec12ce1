//! End-to-end runs of ReportService with in-memory source and sink.

use other_expenses::adapters::ai::MockEnrichmentAdapter;
use other_expenses::adapters::persistence::{JsonFileSink, RESULT_FILE_NAME};
use other_expenses::adapters::source::FixedExpenseSource;
use other_expenses::domain::{AggregateResult, DomainError, PipelineError, Stage};
use other_expenses::ports::{ExpenseSourcePort, ResultSinkPort};
use other_expenses::usecases::{EnrichmentService, ExpensePipeline, ReportService};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

struct StaticSource(Result<Value, String>);

#[async_trait::async_trait]
impl ExpenseSourcePort for StaticSource {
    async fn fetch_expenses(&self) -> Result<Value, DomainError> {
        self.0.clone().map_err(DomainError::Source)
    }
}

#[derive(Default)]
struct MemorySink {
    saved: Mutex<Vec<AggregateResult>>,
}

#[async_trait::async_trait]
impl ResultSinkPort for MemorySink {
    async fn save_summary(&self, summary: &AggregateResult) -> Result<String, DomainError> {
        self.saved.lock().unwrap().push(summary.clone());
        Ok("memory".to_string())
    }
}

struct BrokenSink;

#[async_trait::async_trait]
impl ResultSinkPort for BrokenSink {
    async fn save_summary(&self, _summary: &AggregateResult) -> Result<String, DomainError> {
        Err(DomainError::Sink("disk full".to_string()))
    }
}

fn service(
    source: Arc<dyn ExpenseSourcePort>,
    enrichment: EnrichmentService,
    sink: Arc<dyn ResultSinkPort>,
) -> ReportService {
    ReportService::new(source, ExpensePipeline::new(enrichment), sink)
}

#[tokio::test]
async fn unreachable_source_uses_fixed_dataset() {
    let sink = Arc::new(MemorySink::default());
    let svc = service(
        Arc::new(StaticSource(Err("connection refused".to_string()))),
        EnrichmentService::offline(),
        sink.clone(),
    );

    let outcome = svc.run().await;
    assert!(outcome.used_fallback_data);
    assert!(outcome.succeeded());
    assert_eq!(outcome.saved_to.as_deref(), Some("memory"));

    let saved = sink.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].total_other_expenses(), Decimal::from(13400));
    assert_eq!(saved[0].legal_and_professional_charges(), Decimal::from(5300));
}

#[tokio::test]
async fn failed_run_is_not_persisted() {
    let sink = Arc::new(MemorySink::default());
    let doc = json!({"expenses": [{"id": 9, "category": "Travel", "amount": "abc"}]});
    let svc = service(
        Arc::new(StaticSource(Ok(doc))),
        EnrichmentService::offline(),
        sink.clone(),
    );

    let outcome = svc.run().await;
    assert!(!outcome.succeeded());
    assert!(!outcome.used_fallback_data);
    assert_eq!(outcome.state.stage(), Stage::Failed);
    assert!(matches!(
        outcome.state.error(),
        Some(PipelineError::Aggregation(_))
    ));
    assert!(outcome.saved_to.is_none());
    assert!(sink.saved.lock().unwrap().is_empty());

    let report = outcome.state.report().unwrap();
    assert!(report.degraded);
    assert_eq!(report.summary.total_other_expenses(), Decimal::ZERO);
}

#[tokio::test]
async fn provider_failure_keeps_run_successful() {
    let sink = Arc::new(MemorySink::default());
    let provider = Arc::new(MockEnrichmentAdapter::failing());
    let svc = service(
        Arc::new(FixedExpenseSource),
        EnrichmentService::new(Some(provider.clone())),
        sink.clone(),
    );

    let outcome = svc.run().await;
    assert!(outcome.succeeded());
    assert_eq!(provider.calls(), 1);
    let narrative = outcome.state.aggregate().unwrap().narrative().unwrap();
    assert!(narrative.contains("No significant anomalies detected"));
    assert!(!narrative.contains("[MOCK]"));
}

#[tokio::test]
async fn summary_written_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(
        Arc::new(FixedExpenseSource),
        EnrichmentService::offline(),
        Arc::new(JsonFileSink::in_dir(dir.path())),
    );

    let outcome = svc.run().await;
    assert_eq!(outcome.saved_to.as_deref(), Some(RESULT_FILE_NAME));

    let written = std::fs::read_to_string(dir.path().join(RESULT_FILE_NAME)).unwrap();
    let json: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["auditor_fees"], 5000.0);
    assert_eq!(json["legal_and_professional_charges"], 5300.0);
    assert_eq!(json["travel_and_administrative_expenses"], 3100.0);
    assert_eq!(json["total_other_expenses"], 13400.0);
    assert!(
        json["ai_analysis"]
            .as_str()
            .unwrap()
            .starts_with("Analysis Summary:")
    );
}

#[tokio::test]
async fn sink_failure_keeps_report_and_fails_run() {
    let svc = service(
        Arc::new(FixedExpenseSource),
        EnrichmentService::offline(),
        Arc::new(BrokenSink),
    );

    let outcome = svc.run().await;
    assert_eq!(outcome.state.stage(), Stage::Done);
    assert!(!outcome.succeeded());
    assert!(outcome.saved_to.is_none());
    assert!(matches!(outcome.save_error, Some(DomainError::Sink(_))));
    assert!(
        outcome
            .state
            .output()
            .unwrap()
            .contains("TOTAL OTHER EXPENSES: $13400.00")
    );
}

#[tokio::test]
async fn process_runs_a_prefetched_document() {
    let sink = Arc::new(MemorySink::default());
    let svc = service(
        Arc::new(StaticSource(Err("never fetched".to_string()))),
        EnrichmentService::offline(),
        sink.clone(),
    );
    let doc = json!({"expenses": [{"id": 1, "category": "Auditor", "amount": 42}]});

    let outcome = svc.process(doc, false).await;
    assert!(outcome.succeeded());
    assert!(!outcome.used_fallback_data);
    assert_eq!(
        sink.saved.lock().unwrap()[0].total_other_expenses(),
        Decimal::from(42)
    );
}
