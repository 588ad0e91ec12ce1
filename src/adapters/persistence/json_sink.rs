//! Implements ResultSinkPort using a JSON file.
//!
//! Writes the run summary to `other_expenses_result.json` (pretty-printed).

use crate::domain::{AggregateResult, DomainError};
use crate::ports::ResultSinkPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Fixed file name of the persisted summary.
pub const RESULT_FILE_NAME: &str = "other_expenses_result.json";

/// JSON file summary sink.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Sink writing `RESULT_FILE_NAME` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(RESULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic save using write-replace pattern.
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn write_atomic(&self, json: &str) -> Result<(), DomainError> {
        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Sink(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Sink(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Sink(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Sink(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResultSinkPort for JsonFileSink {
    async fn save_summary(&self, summary: &AggregateResult) -> Result<String, DomainError> {
        let json =
            serde_json::to_string_pretty(summary).map_err(|e| DomainError::Sink(e.to_string()))?;
        self.write_atomic(&json).await?;

        info!(path = %self.path.display(), "saved summary to disk (JSON)");
        Ok(self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bucket, BucketTotals};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_save_summary() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::in_dir(dir.path());

        let mut totals = BucketTotals::default();
        totals.add(Bucket::Auditor, Decimal::from(5000));
        totals.add(Bucket::TravelAndAdministrative, Decimal::new(31005, 1));
        let summary = AggregateResult::new(totals, Some("narrative".to_string())).unwrap();

        let name = sink.save_summary(&summary).await.unwrap();
        assert_eq!(name, RESULT_FILE_NAME);
        assert!(!dir.path().join("other_expenses_result.json.tmp").exists());

        let written = std::fs::read_to_string(sink.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["auditor_fees"], 5000.0);
        assert_eq!(json["travel_and_administrative_expenses"], 3100.5);
        assert_eq!(json["total_other_expenses"], 8100.5);
        assert_eq!(json["ai_analysis"], "narrative");

        let back: AggregateResult = serde_json::from_str(&written).unwrap();
        assert_eq!(back, summary);
    }

    #[tokio::test]
    async fn test_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::in_dir(dir.path().join("missing"));
        let err = sink
            .save_summary(&AggregateResult::zeroed())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Sink(_)));
    }
}
