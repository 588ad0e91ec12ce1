//! Aggregator. Sums coerced amounts per bucket.
//!
//! Each bucket re-tests every item on its own, so a label that matches two
//! buckets adds its amount to both. One bad amount fails the whole step, and so
//! does a sum that no longer fits in a `Decimal`.

use super::classifier::buckets_for;
use super::entities::{BucketTotals, ExpenseRecord};
use super::errors::PipelineError;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

pub fn aggregate(items: &[ExpenseRecord]) -> Result<BucketTotals, PipelineError> {
    let mut totals = BucketTotals::default();
    for item in items {
        let buckets = buckets_for(&item.category);
        if buckets.is_empty() {
            continue;
        }
        let amount = coerce_amount(&item.amount).map_err(|reason| {
            PipelineError::Aggregation(format!(
                "expense {} ({}): {}",
                item.id, item.category, reason
            ))
        })?;
        for bucket in buckets {
            totals.add(bucket, amount).ok_or_else(|| {
                PipelineError::Aggregation(format!(
                    "{} total overflowed at expense {}",
                    bucket.name(),
                    item.id
                ))
            })?;
        }
    }
    if totals.grand_total().is_none() {
        return Err(PipelineError::Aggregation("grand total overflowed".to_string()));
    }
    Ok(totals)
}

/// Numbers and numeric strings become exact decimals; anything else is rejected.
pub fn coerce_amount(value: &Value) -> Result<Decimal, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Decimal::from(u))
            } else {
                parse_decimal(&n.to_string())
            }
        }
        Value::String(s) => parse_decimal(s.trim()),
        Value::Null => Err("amount is missing".to_string()),
        other => Err(format!("amount {} is not a number", other)),
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, String> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| format!("could not convert '{}' to a number", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(category: &str, amount: Value) -> ExpenseRecord {
        ExpenseRecord::new(1, category, amount, "2024-01-01")
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(&json!(5000)).unwrap(), Decimal::from(5000));
        assert_eq!(coerce_amount(&json!(0.1)).unwrap(), Decimal::new(1, 1));
        assert_eq!(coerce_amount(&json!(" 12.50 ")).unwrap(), Decimal::new(1250, 2));
        assert_eq!(coerce_amount(&json!("1.5e3")).unwrap(), Decimal::from(1500));
        assert_eq!(coerce_amount(&json!(-75)).unwrap(), Decimal::from(-75));
        assert!(coerce_amount(&json!("abc")).is_err());
        assert!(coerce_amount(&json!(null)).is_err());
        assert!(coerce_amount(&json!(true)).is_err());
        assert!(coerce_amount(&json!([1])).is_err());
    }

    #[test]
    fn test_fixed_dataset_totals() {
        let items = vec![
            record("Auditor Fees", json!(5000)),
            record("Legal Fees", json!(3500)),
            record("Travel Expenses", json!(2200)),
            record("Professional Services", json!(1800)),
            record("Administrative", json!(900)),
        ];

        let totals = aggregate(&items).unwrap();
        assert_eq!(totals.auditor, Decimal::from(5000));
        assert_eq!(totals.legal_and_professional, Decimal::from(5300));
        assert_eq!(totals.travel_and_administrative, Decimal::from(3100));
        assert_eq!(totals.grand_total(), Some(Decimal::from(13400)));
    }

    #[test]
    fn test_multi_bucket_item_counts_in_each() {
        let items = vec![record("Legal and Travel Expenses", json!("100.25"))];

        let totals = aggregate(&items).unwrap();
        assert_eq!(totals.auditor, Decimal::ZERO);
        assert_eq!(totals.legal_and_professional, Decimal::new(10025, 2));
        assert_eq!(totals.travel_and_administrative, Decimal::new(10025, 2));
        assert_eq!(totals.grand_total(), Some(Decimal::new(20050, 2)));
    }

    #[test]
    fn test_exact_decimal_sums() {
        let items: Vec<_> = (0..10).map(|_| record("Travel", json!(0.1))).collect();
        let totals = aggregate(&items).unwrap();
        assert_eq!(totals.travel_and_administrative, Decimal::from(1));
        assert_eq!(
            totals.grand_total(),
            Some(totals.auditor + totals.legal_and_professional + totals.travel_and_administrative)
        );
    }

    #[test]
    fn test_bad_amount_fails_everything() {
        let items = vec![
            record("Auditor Fees", json!(5000)),
            record("Legal Fees", json!("abc")),
        ];

        let err = aggregate(&items).unwrap_err();
        match err {
            PipelineError::Aggregation(msg) => assert!(msg.contains("abc")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bucket_overflow_fails_everything() {
        let items = vec![
            record("Auditor Fees", json!("79228162514264337593543950335")),
            record("Auditor Fees", json!("1")),
        ];

        let err = aggregate(&items).unwrap_err();
        match err {
            PipelineError::Aggregation(msg) => {
                assert!(msg.contains("auditor_fees total overflowed"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_double_counted_grand_total_overflow_fails() {
        let items = vec![record("Legal and Travel", json!("50000000000000000000000000000"))];

        assert_eq!(
            aggregate(&items),
            Err(PipelineError::Aggregation("grand total overflowed".into()))
        );
    }

    #[test]
    fn test_empty_input() {
        let totals = aggregate(&[]).unwrap();
        assert_eq!(totals, BucketTotals::default());
        assert_eq!(totals.grand_total(), Some(Decimal::ZERO));
    }
}
