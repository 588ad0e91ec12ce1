//! Application use cases. Orchestrate domain logic via ports.

pub mod enrichment_service;
pub mod pipeline;
pub mod report_service;

pub use enrichment_service::EnrichmentService;
pub use pipeline::ExpensePipeline;
pub use report_service::{ReportService, RunOutcome};
