use crate::error::Result;
use crate::fs::write_json_atomic;
use crate::types::CacheEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk shape of the cache file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    timestamp: DateTime<Utc>,
    total_selectors: usize,
    selectors: BTreeMap<String, CacheEntry>,
}

/// Cross-run store of every selector ever mined, keyed by selector hex.
///
/// The cache only ever grows: entries are added or overwritten, never
/// removed. It is an optimization, not a source of truth. A missing or
/// corrupt file degrades to an empty store with a warning, and every accepted
/// result is re-verified against its target before it lands here.
#[derive(Debug)]
pub struct SelectorCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl SelectorCache {
    /// Load the cache, tolerating absence and corruption.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<CacheFile>(&bytes) {
                Ok(file) => {
                    log::info!(
                        "loaded selector cache: {} mined selectors (last updated {})",
                        file.selectors.len(),
                        file.timestamp
                    );
                    file.selectors
                }
                Err(err) => {
                    log::warn!(
                        "could not parse selector cache {}: {err}; starting empty",
                        path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no selector cache at {}; starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => {
                log::warn!(
                    "could not read selector cache {}: {err}; starting empty",
                    path.display()
                );
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// In-memory view used to seed the orchestrator's selector map.
    pub fn entries(&self) -> &BTreeMap<String, CacheEntry> {
        &self.entries
    }

    pub fn get(&self, selector_hex: &str) -> Option<&CacheEntry> {
        self.entries.get(selector_hex)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge one entry and persist the whole store immediately
    /// (write-through, no batching).
    pub async fn upsert(&mut self, selector_hex: &str, entry: CacheEntry) -> Result<()> {
        self.entries.insert(selector_hex.to_string(), entry);
        self.save().await
    }

    pub async fn save(&self) -> Result<()> {
        let file = CacheFile {
            timestamp: Utc::now(),
            total_selectors: self.entries.len(),
            selectors: self.entries.clone(),
        };
        write_json_atomic(&self.path, &file).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
