//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod aggregator;
pub mod classifier;
pub mod entities;
pub mod errors;
pub mod extraction;
pub mod fixtures;
pub mod report;
pub mod state;

pub use entities::{
    AggregateResult, Bucket, BucketTotals, ExpenseRecord, Narrative, NarrativeSource, Report,
};
pub use errors::{DomainError, PipelineError};
pub use state::{PipelineState, Stage};
