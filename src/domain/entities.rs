//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here. Adapters hand over raw JSON and these are built from it.

use super::errors::PipelineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single expense as delivered by the expense source.
///
/// `amount` keeps the original JSON representation so it can be re-serialized
/// without loss; it is only coerced to a decimal during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    pub id: Value,
    pub category: String,
    pub amount: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ExpenseRecord {
    pub fn new(id: impl Into<Value>, category: &str, amount: impl Into<Value>, date: &str) -> Self {
        Self {
            id: id.into(),
            category: category.to_string(),
            amount: amount.into(),
            date: Some(date.to_string()),
        }
    }
}

/// The three fixed other-expense buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Auditor,
    LegalAndProfessional,
    TravelAndAdministrative,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [
        Bucket::Auditor,
        Bucket::LegalAndProfessional,
        Bucket::TravelAndAdministrative,
    ];

    /// Summary key of this bucket.
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Auditor => "auditor_fees",
            Bucket::LegalAndProfessional => "legal_and_professional_charges",
            Bucket::TravelAndAdministrative => "travel_and_administrative_expenses",
        }
    }

    /// Lowercase substrings that place a category label in this bucket.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Bucket::Auditor => &["auditor"],
            Bucket::LegalAndProfessional => &["legal", "professional"],
            Bucket::TravelAndAdministrative => &["travel", "administrative"],
        }
    }
}

/// Per-bucket sums produced by the aggregator, before enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketTotals {
    pub auditor: Decimal,
    pub legal_and_professional: Decimal,
    pub travel_and_administrative: Decimal,
}

impl BucketTotals {
    /// Add `amount` to `bucket`. Returns the new bucket sum, or `None` on overflow
    /// (the bucket is left unchanged).
    pub fn add(&mut self, bucket: Bucket, amount: Decimal) -> Option<Decimal> {
        let slot = match bucket {
            Bucket::Auditor => &mut self.auditor,
            Bucket::LegalAndProfessional => &mut self.legal_and_professional,
            Bucket::TravelAndAdministrative => &mut self.travel_and_administrative,
        };
        let sum = slot.checked_add(amount)?;
        *slot = sum;
        Some(sum)
    }

    /// Sum of the three buckets. An item counted in two buckets is counted twice here.
    /// `None` when the sum does not fit in a `Decimal`.
    pub fn grand_total(&self) -> Option<Decimal> {
        self.auditor
            .checked_add(self.legal_and_professional)?
            .checked_add(self.travel_and_administrative)
    }
}

/// Aggregation output plus the optional narrative. Also the persisted summary.
///
/// Fields are private: the grand total is always derived from the bucket sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(with = "rust_decimal::serde::float")]
    auditor_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    legal_and_professional_charges: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    travel_and_administrative_expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_other_expenses: Decimal,
    ai_analysis: Option<String>,
}

/// Narrative used when no aggregate was produced.
pub const NO_ANALYSIS_PLACEHOLDER: &str = "No analysis available";

impl AggregateResult {
    /// Fails with an `Aggregation` error when the grand total overflows.
    pub fn new(totals: BucketTotals, narrative: Option<String>) -> Result<Self, PipelineError> {
        let total = totals
            .grand_total()
            .ok_or_else(|| PipelineError::Aggregation("grand total overflowed".to_string()))?;
        Ok(Self {
            auditor_fees: totals.auditor,
            legal_and_professional_charges: totals.legal_and_professional,
            travel_and_administrative_expenses: totals.travel_and_administrative,
            total_other_expenses: total,
            ai_analysis: narrative,
        })
    }

    /// All-zero summary substituted by the renderer when upstream failed.
    pub fn zeroed() -> Self {
        Self {
            auditor_fees: Decimal::ZERO,
            legal_and_professional_charges: Decimal::ZERO,
            travel_and_administrative_expenses: Decimal::ZERO,
            total_other_expenses: Decimal::ZERO,
            ai_analysis: Some(NO_ANALYSIS_PLACEHOLDER.to_string()),
        }
    }

    pub fn auditor_fees(&self) -> Decimal {
        self.auditor_fees
    }

    pub fn legal_and_professional_charges(&self) -> Decimal {
        self.legal_and_professional_charges
    }

    pub fn travel_and_administrative_expenses(&self) -> Decimal {
        self.travel_and_administrative_expenses
    }

    pub fn total_other_expenses(&self) -> Decimal {
        self.total_other_expenses
    }

    pub fn narrative(&self) -> Option<&str> {
        self.ai_analysis.as_deref()
    }

    pub fn totals(&self) -> BucketTotals {
        BucketTotals {
            auditor: self.auditor_fees,
            legal_and_professional: self.legal_and_professional_charges,
            travel_and_administrative: self.travel_and_administrative_expenses,
        }
    }
}

/// Where a narrative came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSource {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub text: String,
    pub source: NarrativeSource,
}

/// Rendered output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    pub summary: AggregateResult,
    /// True when the summary is the zero substitute for a missing aggregate.
    pub degraded: bool,
}
