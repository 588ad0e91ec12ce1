//! Expense source adapters. Implement ExpenseSourcePort.

pub mod fixed_source;
pub mod http_source;

pub use fixed_source::FixedExpenseSource;
pub use http_source::HttpExpenseSource;
