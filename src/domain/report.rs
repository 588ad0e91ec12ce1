//! Report renderer and the offline fallback narrative.
//!
//! Both are pure: same aggregate and items in, same text out.

use super::entities::{AggregateResult, BucketTotals, ExpenseRecord, Report};
use super::errors::PipelineError;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

const RULE: &str = "================================================================";

/// `$1234.50`. Negative amounts keep their sign after the currency prefix.
pub fn format_money(amount: Decimal) -> String {
    format!(
        "${:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Narrative built only from bucket sums. Used whenever the AI provider is unavailable.
pub fn fallback_narrative(totals: &BucketTotals) -> String {
    format!(
        "Analysis Summary:\n\
         - Total audit-related fees: {}\n\
         - Legal and professional services: {}\n\
         - Travel and administrative costs: {}\n\
         - No significant anomalies detected in expense patterns",
        format_money(totals.auditor),
        format_money(totals.legal_and_professional),
        format_money(totals.travel_and_administrative),
    )
}

/// Render the fixed-layout report.
///
/// A missing aggregate is replaced by `AggregateResult::zeroed()` and the report
/// is marked degraded; the caller keeps whatever error caused it.
pub fn render_report(
    aggregate: Option<&AggregateResult>,
    items: &[ExpenseRecord],
) -> Result<Report, PipelineError> {
    let (summary, degraded) = match aggregate {
        Some(result) => (result.clone(), false),
        None => (AggregateResult::zeroed(), true),
    };

    let text = render_text(&summary, items).map_err(|e| PipelineError::Render(e.to_string()))?;

    Ok(Report {
        text,
        summary,
        degraded,
    })
}

fn render_text(
    summary: &AggregateResult,
    items: &[ExpenseRecord],
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "         OTHER EXPENSE CALCULATION REPORT")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "EXPENSE BREAKDOWN:")?;
    writeln!(out)?;

    let sections = [
        ("1. AUDITOR FEES", summary.auditor_fees()),
        (
            "2. LEGAL AND PROFESSIONAL CHARGES",
            summary.legal_and_professional_charges(),
        ),
        (
            "3. TRAVEL AND ADMINISTRATIVE EXPENSES",
            summary.travel_and_administrative_expenses(),
        ),
    ];
    for (title, amount) in sections {
        writeln!(out, "{title}")?;
        writeln!(out, "   Amount: {}", format_money(amount))?;
        writeln!(out)?;
    }

    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "TOTAL OTHER EXPENSES: {}",
        format_money(summary.total_other_expenses())
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "AI ANALYSIS:")?;
    writeln!(out, "{}", summary.narrative().unwrap_or("No analysis"))?;
    writeln!(out)?;
    writeln!(out, "DETAILS:")?;
    writeln!(out, "• Total Items Processed: {}", items.len())?;
    writeln!(out, "• Reporting Period: {}", reporting_period(items))?;
    writeln!(
        out,
        "• Framework: Focus on key components with anomaly detection"
    )?;
    Ok(out)
}

/// Earliest to latest parseable `YYYY-MM-DD` date, or "Current" when there are none.
fn reporting_period(items: &[ExpenseRecord]) -> String {
    let dates: Vec<NaiveDate> = items
        .iter()
        .filter_map(|r| r.date.as_deref())
        .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .collect();

    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "Current".to_string(),
    }
}
