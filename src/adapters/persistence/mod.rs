//! Persistence adapters. Implement ResultSinkPort.

pub mod json_sink;

pub use json_sink::{JsonFileSink, RESULT_FILE_NAME};
