//! # PUSH4 Mining
//!
//! The control loop of the pipeline. Given an ordered target list, the
//! orchestrator reconciles the cross-run cache and the per-run ledger,
//! decides what still needs brute-force search, drives the external search
//! worker (one target at a time or batched through a file-based request),
//! verifies every result by re-hashing it, resolves name collisions with a
//! bounded prefix-retry policy, and flushes cache and ledger after each
//! success so a run can be interrupted anywhere and resumed for free.

mod error;
mod orchestrator;
mod protocol;
mod service;
mod worker;

pub use error::{MiningError, Result};
pub use orchestrator::{MiningOrchestrator, BATCH_THRESHOLD, MAX_ATTEMPTS};
pub use protocol::{
    parse_found_line, parse_result_line, BatchResultLine, FrameEvent, ResultsFrame, RESULTS_END,
    RESULTS_START,
};
pub use service::{BatchOutcome, Candidate, SearchOutcome, SelectorSearchService};
pub use worker::{MinerWorker, MINER_BINARY_NAME, SINGLE_SEARCH_TIMEOUT};
