//! Pipeline state. One instance per run, threaded through the stages in order.

use super::entities::{AggregateResult, ExpenseRecord, Report};
use super::errors::PipelineError;
use serde_json::Value;

/// `Initialized → Extracted → Aggregated → Rendered → Done`; `Failed` once any stage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initialized,
    Extracted,
    Aggregated,
    Rendered,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PipelineState {
    pub(crate) raw: Value,
    pub(crate) items: Vec<ExpenseRecord>,
    pub(crate) aggregate: Option<AggregateResult>,
    pub(crate) report: Option<Report>,
    pub(crate) error: Option<PipelineError>,
    pub(crate) stage: Stage,
}

impl PipelineState {
    pub fn new(raw: Value) -> Self {
        Self {
            raw,
            items: Vec::new(),
            aggregate: None,
            report: None,
            error: None,
            stage: Stage::Initialized,
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Records kept by the classifier.
    pub fn items(&self) -> &[ExpenseRecord] {
        &self.items
    }

    pub fn aggregate(&self) -> Option<&AggregateResult> {
        self.aggregate.as_ref()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Rendered report text, if the renderer ran.
    pub fn output(&self) -> Option<&str> {
        self.report.as_ref().map(|r| r.text.as_str())
    }

    pub fn error(&self) -> Option<&PipelineError> {
        self.error.as_ref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Record a stage error. The first error wins; the stage becomes `Failed`.
    pub(crate) fn fail(&mut self, error: PipelineError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.stage = Stage::Failed;
    }

    /// Move to `next` unless the run has already failed.
    pub(crate) fn advance(&mut self, next: Stage) {
        if self.stage != Stage::Failed {
            self.stage = next;
        }
    }
}
