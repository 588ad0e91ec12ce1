//! Report service. One full run: fetch → pipeline → persist.
//!
//! Coordinates between the expense source, the pipeline and the result sink.

use crate::domain::fixtures::fallback_dataset;
use crate::domain::{DomainError, PipelineState, Stage};
use crate::ports::{ExpenseSourcePort, ResultSinkPort};
use crate::usecases::ExpensePipeline;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of a run, handed back to the binary for presentation.
#[derive(Debug)]
pub struct RunOutcome {
    pub state: PipelineState,
    /// True when the fixed dataset replaced the source's answer.
    pub used_fallback_data: bool,
    /// Where the summary was saved. `None` when the run failed or the save failed.
    pub saved_to: Option<String>,
    /// Sink failure for a run that otherwise ended `Done`.
    pub save_error: Option<DomainError>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.state.stage() == Stage::Done && self.save_error.is_none()
    }
}

pub struct ReportService {
    source: Arc<dyn ExpenseSourcePort>,
    pipeline: ExpensePipeline,
    sink: Arc<dyn ResultSinkPort>,
}

impl ReportService {
    pub fn new(
        source: Arc<dyn ExpenseSourcePort>,
        pipeline: ExpensePipeline,
        sink: Arc<dyn ResultSinkPort>,
    ) -> Self {
        Self {
            source,
            pipeline,
            sink,
        }
    }

    /// Fetch the expense document, substituting the fixed dataset on any source error.
    pub async fn fetch_or_fallback(&self) -> (Value, bool) {
        match self.source.fetch_expenses().await {
            Ok(doc) => (doc, false),
            Err(e) => {
                warn!(error = %e, "expense source unavailable, using fixed dataset");
                (fallback_dataset(), true)
            }
        }
    }

    /// Fetch, run the pipeline, and save the summary if the run succeeded.
    pub async fn run(&self) -> RunOutcome {
        let (raw, used_fallback_data) = self.fetch_or_fallback().await;
        self.process(raw, used_fallback_data).await
    }

    /// Run the pipeline over an already fetched document and save the summary on `Done`.
    ///
    /// Pipeline and sink failures are both reported in the outcome.
    pub async fn process(&self, raw: Value, used_fallback_data: bool) -> RunOutcome {
        let state = self.pipeline.run(raw).await;

        let mut saved_to = None;
        let mut save_error = None;
        if let (Stage::Done, Some(report)) = (state.stage(), state.report()) {
            match self.sink.save_summary(&report.summary).await {
                Ok(location) => {
                    info!(location = %location, "summary saved");
                    saved_to = Some(location);
                }
                Err(e) => {
                    error!(error = %e, "failed to save summary");
                    save_error = Some(e);
                }
            }
        }

        RunOutcome {
            state,
            used_fallback_data,
            saved_to,
            save_error,
        }
    }
}
