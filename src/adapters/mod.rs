//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP expense source, AI provider, filesystem, console. Map errors to DomainError.

pub mod ai;
pub mod persistence;
pub mod source;
pub mod ui;
