//! Fixed dataset served when the expense source cannot be reached.

use serde_json::{Value, json};

pub fn fallback_dataset() -> Value {
    json!({
        "expenses": [
            {"id": 1, "category": "Auditor Fees", "amount": 5000, "date": "2024-01-15"},
            {"id": 2, "category": "Legal Fees", "amount": 3500, "date": "2024-01-20"},
            {"id": 3, "category": "Travel Expenses", "amount": 2200, "date": "2024-01-25"},
            {"id": 4, "category": "Professional Services", "amount": 1800, "date": "2024-02-05"},
            {"id": 5, "category": "Administrative", "amount": 900, "date": "2024-02-10"}
        ]
    })
}
