//! Expense pipeline: extract → aggregate (+ enrich) → render.
//!
//! - Each stage skips its work if an earlier stage recorded an error
//! - The render stage always runs and falls back to a zeroed summary
//! - `run` never returns an error; inspect the final state instead

use crate::domain::aggregator;
use crate::domain::classifier::filter_other_expenses;
use crate::domain::extraction::parse_expense_document;
use crate::domain::report::render_report;
use crate::domain::{AggregateResult, PipelineState, Stage};
use crate::usecases::EnrichmentService;
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct ExpensePipeline {
    enrichment: EnrichmentService,
}

impl ExpensePipeline {
    pub fn new(enrichment: EnrichmentService) -> Self {
        Self { enrichment }
    }

    /// Run all stages on `raw`. Final stage is `Done` or `Failed`.
    pub async fn run(&self, raw: Value) -> PipelineState {
        let mut state = PipelineState::new(raw);
        Self::extract(&mut state);
        self.aggregate(&mut state).await;
        Self::render(&mut state);
        state.advance(Stage::Done);

        match state.error() {
            Some(e) => warn!(error = %e, "pipeline finished with error"),
            None => info!(items = state.items().len(), "pipeline finished"),
        }
        state
    }

    fn extract(state: &mut PipelineState) {
        if state.has_error() {
            return;
        }
        match parse_expense_document(&state.raw) {
            Ok(records) => {
                let total = records.len();
                state.items = filter_other_expenses(&records);
                info!(
                    total,
                    kept = state.items.len(),
                    "extracted other-expense items"
                );
                state.advance(Stage::Extracted);
            }
            Err(e) => state.fail(e),
        }
    }

    async fn aggregate(&self, state: &mut PipelineState) {
        if state.has_error() {
            return;
        }
        let totals = match aggregator::aggregate(&state.items) {
            Ok(totals) => totals,
            Err(e) => {
                state.fail(e);
                return;
            }
        };
        debug!(
            auditor = %totals.auditor,
            legal_and_professional = %totals.legal_and_professional,
            travel_and_administrative = %totals.travel_and_administrative,
            "bucket totals"
        );

        let narrative = self.enrichment.narrative(&state.items, &totals).await;
        match AggregateResult::new(totals, Some(narrative.text)) {
            Ok(result) => {
                state.aggregate = Some(result);
                state.advance(Stage::Aggregated);
            }
            Err(e) => state.fail(e),
        }
    }

    fn render(state: &mut PipelineState) {
        match render_report(state.aggregate.as_ref(), &state.items) {
            Ok(report) => {
                if report.degraded {
                    warn!("no aggregate available, rendering zeroed report");
                }
                state.report = Some(report);
                state.advance(Stage::Rendered);
            }
            Err(e) => state.fail(e),
        }
    }
}
