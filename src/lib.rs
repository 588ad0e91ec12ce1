//! other-expenses: Other-expense classification, totals and anomaly reports with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
