use crate::error::Result;
use crate::fs::write_json_atomic;
use crate::types::{FunctionRecord, ProgressSnapshot};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Per-run snapshot of mining progress, rewritten after every resolved
/// target. Deleting the file is always safe: the run re-derives its targets
/// and the cache still prevents re-mining anything already known.
#[derive(Debug)]
pub struct ProgressLedger {
    path: PathBuf,
}

impl ProgressLedger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the previous snapshot, if one exists and parses. The stored
    /// `total` is advisory only; callers reconcile entries by selector hex.
    pub async fn load(&self) -> Option<ProgressSnapshot> {
        let bytes = tokio::fs::read(&self.path).await.ok()?;
        match serde_json::from_slice::<ProgressSnapshot>(&bytes) {
            Ok(snapshot) => {
                log::info!(
                    "found existing progress: {}/{} selectors (last updated {})",
                    snapshot.completed,
                    snapshot.total,
                    snapshot.timestamp
                );
                Some(snapshot)
            }
            Err(err) => {
                log::warn!(
                    "could not parse progress file {}: {err}; ignoring it",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Overwrite the ledger with the current state of the run.
    pub async fn save(&self, target_hexes: &[String], functions: &[FunctionRecord]) -> Result<()> {
        let snapshot = ProgressSnapshot {
            timestamp: Utc::now(),
            selectors_data: target_hexes.to_vec(),
            completed: functions.len(),
            total: target_hexes.len(),
            functions: functions.to_vec(),
        };
        write_json_atomic(&self.path, &snapshot).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(index: usize, selector: &str, name: &str) -> FunctionRecord {
        FunctionRecord {
            index,
            selector: selector.to_string(),
            func_name: name.to_string(),
            signature: format!("{name}()"),
            params: String::new(),
            has_param: false,
            seed: name.trim_start_matches('f').to_string(),
            prefix: "f".to_string(),
        }
    }

    #[tokio::test]
    async fn absent_ledger_loads_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ProgressLedger::new(dir.path().join("progress.json"));
        assert!(ledger.load().await.is_none());
    }

    #[tokio::test]
    async fn corrupt_ledger_loads_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("progress.json");
        tokio::fs::write(&path, "not json at all").await.expect("write");

        let ledger = ProgressLedger::new(&path);
        assert!(ledger.load().await.is_none());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ProgressLedger::new(dir.path().join("progress.json"));

        let targets = vec!["4f302900".to_string(), "51363301".to_string()];
        let functions = vec![record(0, "4f302900", "f4075")];
        ledger.save(&targets, &functions).await.expect("save");

        let snapshot = ledger.load().await.expect("snapshot");
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.completed, 1);
        assert_eq!(snapshot.selectors_data, targets);
        assert_eq!(snapshot.functions[0].func_name, "f4075");
    }

    #[tokio::test]
    async fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ProgressLedger::new(dir.path().join("progress.json"));

        let targets = vec!["4f302900".to_string(), "51363301".to_string()];
        ledger
            .save(&targets, &[record(0, "4f302900", "f4075")])
            .await
            .expect("first save");
        ledger
            .save(
                &targets,
                &[
                    record(0, "4f302900", "f4075"),
                    record(1, "51363301", "f88"),
                ],
            )
            .await
            .expect("second save");

        let snapshot = ledger.load().await.expect("snapshot");
        assert_eq!(snapshot.completed, 2);
        assert_eq!(snapshot.functions.len(), 2);
    }
}
