//! Persistence for the mining pipeline: the cross-run selector cache and
//! the per-run progress ledger. Both are plain JSON files written through a
//! temp-file-plus-rename so an interrupted write never eats completed work.

mod cache;
mod error;
mod fs;
mod ledger;
mod types;

pub use cache::SelectorCache;
pub use error::{Result, StoreError};
pub use ledger::ProgressLedger;
pub use types::{CacheEntry, FunctionRecord, ProgressSnapshot};
