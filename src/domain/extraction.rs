//! Raw expense document → `ExpenseRecord` list.
//!
//! Document shape: `{"expenses": [{"id", "category", "amount", "date"}, ...]}`.

use super::entities::ExpenseRecord;
use super::errors::PipelineError;
use serde_json::{Map, Value};

/// Parse every record of the document, in order. A missing `expenses` key is an empty list;
/// an explicit `null` is rejected like any other non-list value.
pub fn parse_expense_document(raw: &Value) -> Result<Vec<ExpenseRecord>, PipelineError> {
    let doc = raw.as_object().ok_or_else(|| {
        PipelineError::Extraction(format!("expected a JSON object, got {}", kind(raw)))
    })?;

    let expenses = match doc.get("expenses") {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(PipelineError::Extraction(format!(
                "'expenses' must be a list, got {}",
                kind(other)
            )));
        }
    };

    expenses
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_object().map(record_from_map).ok_or_else(|| {
                PipelineError::Extraction(format!(
                    "expense #{} must be an object, got {}",
                    idx,
                    kind(item)
                ))
            })
        })
        .collect()
}

fn record_from_map(map: &Map<String, Value>) -> ExpenseRecord {
    ExpenseRecord {
        id: map.get("id").cloned().unwrap_or(Value::Null),
        category: category_label(map.get("category")),
        amount: map.get("amount").cloned().unwrap_or(Value::Null),
        date: map.get("date").and_then(|d| match d {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }),
    }
}

/// Category coerced to text. Missing or null is empty and never matches a bucket.
fn category_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document() {
        let raw = json!({
            "expenses": [
                {"id": 1, "category": "Auditor Fees", "amount": 5000, "date": "2024-01-15"},
                {"id": "b-2", "amount": "12.50"},
                {"id": 3, "category": 42, "amount": 1.5, "date": null}
            ]
        });

        let records = parse_expense_document(&raw).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category, "Auditor Fees");
        assert_eq!(records[0].date.as_deref(), Some("2024-01-15"));
        assert_eq!(records[1].category, "");
        assert_eq!(records[1].amount, json!("12.50"));
        assert_eq!(records[2].category, "42");
        assert_eq!(records[2].date, None);
    }

    #[test]
    fn test_missing_expenses_is_empty() {
        assert!(parse_expense_document(&json!({})).unwrap().is_empty());
        assert!(
            parse_expense_document(&json!({"expenses": []}))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_malformed_documents() {
        for raw in [
            json!([1, 2, 3]),
            json!({"expenses": "none"}),
            json!({"expenses": null}),
            json!({"expenses": [{"category": "Legal"}, 7]}),
        ] {
            let err = parse_expense_document(&raw).unwrap_err();
            assert!(matches!(err, PipelineError::Extraction(_)), "{raw}");
        }
    }

    #[test]
    fn test_null_expenses_names_the_kind() {
        let err = parse_expense_document(&json!({"expenses": null})).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Extraction("'expenses' must be a list, got null".into())
        );
    }
}
