use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiningError>;

#[derive(Error, Debug)]
pub enum MiningError {
    /// Pre-flight failure: the worker binary is missing or cannot be built.
    /// Fatal before any mining starts.
    #[error("selector search worker unavailable: {0}")]
    WorkerUnavailable(String),

    /// A single-target invocation exceeded its deadline. Retryable.
    #[error("worker invocation timed out after {0:?}")]
    Timeout(Duration),

    /// Worker output carried no recognizable candidate. Retryable.
    #[error("could not parse worker output: {0}")]
    OutputParse(String),

    /// The candidate's recomputed hash disagrees with the target; a worker
    /// bug or corrupted output. Retryable.
    #[error("selector mismatch for 0x{target}: {signature:?} hashes to 0x{actual}")]
    SelectorMismatch {
        target: String,
        signature: String,
        actual: String,
    },

    /// The candidate name is already assigned in this run. Retryable with a
    /// fresh disambiguating prefix.
    #[error("function name {0:?} already assigned in this run")]
    NameCollision(String),

    /// The batch worker process failed; unresolved items fall back to
    /// single-mode mining rather than failing the run.
    #[error("batch worker process failed: {0}")]
    BatchProcess(String),

    /// The bounded retry budget for one target ran out. Fatal for the run;
    /// progress already flushed stays on disk.
    #[error("no unique function name for 0x{target} after {attempts} attempts")]
    AttemptsExhausted { target: String, attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] push4_store::StoreError),
}

impl MiningError {
    /// Retryable kinds are consumed inside the orchestrator's bounded retry
    /// loop and never surface unless the attempt budget is exhausted.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MiningError::Timeout(_)
                | MiningError::OutputParse(_)
                | MiningError::SelectorMismatch { .. }
                | MiningError::NameCollision(_)
        )
    }
}
