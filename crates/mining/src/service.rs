use crate::error::Result;
use async_trait::async_trait;
use push4_selectors::PixelSelector;
use std::collections::HashMap;

/// One candidate name discovered by the search worker. The orchestrator, not
/// the worker, decides acceptance: every candidate is re-hashed against its
/// target and checked for name collisions before it counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub func_name: String,
    pub signature: String,
    pub nonce: Option<String>,
}

/// Outcome of a single-target search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Candidate),
    NotFound,
}

/// Outcome of one batch invocation. Results parsed before a worker failure
/// are kept: they were already validated line-by-line, and the orchestrator
/// applies them before surfacing the failure.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Discovered candidates keyed by lowercase selector hex (no `0x`).
    pub results: HashMap<String, Candidate>,
    /// Present when the worker process exited non-zero.
    pub failure: Option<String>,
}

/// Capability seam over the external brute-force search worker.
///
/// Implementations spawn at most one search at a time; batch parallelism
/// lives inside the worker process, not here.
#[async_trait]
pub trait SelectorSearchService: Send + Sync {
    /// Pre-flight check, run once before any mining starts. The default is
    /// a no-op for in-process implementations.
    async fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Search for one target. `prefix` disambiguates retry attempts.
    async fn search_one(&self, prefix: &str, target: &PixelSelector) -> Result<SearchOutcome>;

    /// Resolve many targets in one worker invocation. Targets the worker
    /// could not resolve are simply absent from the result map.
    async fn search_batch(&self, targets: &[PixelSelector]) -> Result<BatchOutcome>;
}
