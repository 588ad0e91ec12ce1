//! Category classifier. Decides which records are "other expenses" and which
//! buckets each one feeds.

use super::entities::{Bucket, ExpenseRecord};

/// True if the lowercased label contains any of the bucket's keywords.
pub fn matches_bucket(category: &str, bucket: Bucket) -> bool {
    let label = category.to_lowercase();
    bucket.keywords().iter().any(|kw| label.contains(kw))
}

/// Every bucket the label matches. Labels like "Legal and Travel" match more than one.
pub fn buckets_for(category: &str) -> Vec<Bucket> {
    Bucket::ALL
        .into_iter()
        .filter(|&bucket| matches_bucket(category, bucket))
        .collect()
}

/// True if the label contains at least one keyword from any bucket.
pub fn is_other_expense(category: &str) -> bool {
    Bucket::ALL
        .into_iter()
        .any(|bucket| matches_bucket(category, bucket))
}

/// Keep only other-expense records, in input order.
pub fn filter_other_expenses(records: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|r| is_other_expense(&r.category))
        .cloned()
        .collect()
}
