//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `DomainError`. Pipeline stages
//! record `PipelineError` on the state instead of returning it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Expense source error: {0}")]
    Source(String),

    #[error("AI enrichment failed: {0}")]
    Enrichment(String),

    #[error("Result sink error: {0}")]
    Sink(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Stage failure captured on the pipeline state. Only the first one is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Raw input is not shaped like an expense document.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An amount could not be coerced to a number.
    #[error("Calculation error: {0}")]
    Aggregation(String),

    #[error("Output generation error: {0}")]
    Render(String),
}
