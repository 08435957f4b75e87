use crate::error::{MiningError, Result};
use crate::service::{Candidate, SearchOutcome, SelectorSearchService};
use chrono::Utc;
use push4_selectors::{function_selector, PixelSelector, PrefixStrategy, RandomSuffixPrefix};
use push4_store::{CacheEntry, FunctionRecord, ProgressLedger, SelectorCache};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Worklists at least this large go through one batched worker invocation;
/// smaller ones are mined one target at a time.
pub const BATCH_THRESHOLD: usize = 10;

/// Bounded retry budget per target. Exhausting it is fatal for the run.
pub const MAX_ATTEMPTS: u32 = 30;

/// Sequential control loop reconciling cache, ledger, and the current target
/// list, and driving the search service for whatever remains.
///
/// At most one worker invocation is in flight at any time. After every
/// accepted result the cache and ledger are flushed, so interrupting the
/// process anywhere loses nothing already solved.
pub struct MiningOrchestrator<S> {
    service: S,
    prefix_strategy: Box<dyn PrefixStrategy + Send>,
    max_attempts: u32,
}

impl<S: SelectorSearchService> MiningOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            prefix_strategy: Box::new(RandomSuffixPrefix),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_prefix_strategy(mut self, strategy: Box<dyn PrefixStrategy + Send>) -> Self {
        self.prefix_strategy = strategy;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Resolve every target to a [`FunctionRecord`], mining only what the
    /// cache and ledger cannot already answer.
    pub async fn resolve_all(
        &mut self,
        targets: &[PixelSelector],
        cache: &mut SelectorCache,
        ledger: &ProgressLedger,
    ) -> Result<Vec<FunctionRecord>> {
        // Seed from the cache, then overlay the ledger: the ledger reflects
        // the most recent run and wins on conflict.
        let mut selector_map: HashMap<String, FunctionRecord> = cache
            .entries()
            .iter()
            .map(|(hex, entry)| (hex.clone(), entry.to_record(0, hex)))
            .collect();
        if let Some(snapshot) = ledger.load().await {
            if snapshot.total != targets.len() {
                log::warn!(
                    "ledger total {} does not match {} derived targets; reconciling by selector value",
                    snapshot.total,
                    targets.len()
                );
            }
            for record in snapshot.functions {
                selector_map.insert(record.selector.clone(), record);
            }
        }
        if !selector_map.is_empty() {
            log::info!("loaded {} existing function mappings", selector_map.len());
        }

        let target_hexes: Vec<String> = targets.iter().map(PixelSelector::to_hex).collect();

        let mut functions: Vec<Option<FunctionRecord>> = Vec::with_capacity(targets.len());
        let mut worklist: Vec<usize> = Vec::new();
        let mut reused = 0usize;
        for (i, hex) in target_hexes.iter().enumerate() {
            match selector_map.get(hex) {
                Some(record) => {
                    let mut record = record.clone();
                    record.index = i;
                    functions.push(Some(record));
                    reused += 1;
                }
                None => {
                    functions.push(None);
                    worklist.push(i);
                }
            }
        }
        log::info!("reused {reused} existing selectors, {} need mining", worklist.len());

        if worklist.is_empty() {
            log::info!("all selectors already known; no mining needed");
            return Ok(completed(&functions));
        }

        self.service.ensure_ready().await?;

        let mut used_names: HashSet<String> = functions
            .iter()
            .flatten()
            .map(|f| f.func_name.clone())
            .collect();

        if worklist.len() >= BATCH_THRESHOLD {
            let pending: Vec<PixelSelector> = worklist.iter().map(|&i| targets[i]).collect();
            let outcome = self.service.search_batch(&pending).await?;

            let mut unresolved: Vec<usize> = Vec::new();
            for &i in &worklist {
                let hex = &target_hexes[i];
                let Some(candidate) = outcome.results.get(hex) else {
                    unresolved.push(i);
                    continue;
                };
                match accept(i, &targets[i], candidate, "f", &mut used_names) {
                    Ok(record) => {
                        cache
                            .upsert(hex, CacheEntry::from_record(&record, Utc::now()))
                            .await?;
                        functions[i] = Some(record);
                        ledger.save(&target_hexes, &completed(&functions)).await?;
                    }
                    Err(err) if err.is_retryable() => {
                        log::warn!("batch result for 0x{hex} rejected: {err}");
                        unresolved.push(i);
                    }
                    Err(err) => return Err(err),
                }
            }
            log::info!(
                "batch mining resolved {}/{} selectors",
                worklist.len() - unresolved.len(),
                worklist.len()
            );

            if let Some(reason) = &outcome.failure {
                log::error!(
                    "batch mining failed ({reason}); retrying {} unresolved selectors in single mode",
                    unresolved.len()
                );
            } else if !unresolved.is_empty() {
                log::warn!(
                    "{} selectors not resolved by batch mode; falling back to single mining",
                    unresolved.len()
                );
            }

            for &i in &unresolved {
                self.mine_single(i, targets, &target_hexes, &mut functions, &mut used_names, cache, ledger)
                    .await?;
            }
        } else {
            for &i in &worklist {
                self.mine_single(i, targets, &target_hexes, &mut functions, &mut used_names, cache, ledger)
                    .await?;
            }
        }

        Ok(completed(&functions))
    }

    /// Mine one target with the bounded prefix-retry policy. On success the
    /// record is flushed to cache and ledger before returning.
    #[allow(clippy::too_many_arguments)]
    async fn mine_single(
        &mut self,
        index: usize,
        targets: &[PixelSelector],
        target_hexes: &[String],
        functions: &mut [Option<FunctionRecord>],
        used_names: &mut HashSet<String>,
        cache: &mut SelectorCache,
        ledger: &ProgressLedger,
    ) -> Result<()> {
        let target = targets[index];
        let hex = &target_hexes[index];
        log::info!("mining selector {}: 0x{hex}", index + 1);

        let mut tried: HashSet<String> = HashSet::new();
        let mut attempt = 0u32;
        while attempt < self.max_attempts {
            let prefix = self.prefix_strategy.prefix_for_attempt(attempt);
            if !tried.insert(prefix.clone()) {
                attempt += 1;
                continue;
            }
            if attempt > 0 {
                log::warn!("retrying 0x{hex} with prefix {prefix:?} (attempt {})", attempt + 1);
            }

            let started = Instant::now();
            match self.service.search_one(&prefix, &target).await {
                Ok(SearchOutcome::Found(candidate)) => {
                    match accept(index, &target, &candidate, &prefix, used_names) {
                        Ok(record) => {
                            log::info!(
                                "found {} for 0x{hex} ({:.2}s)",
                                record.signature,
                                started.elapsed().as_secs_f64()
                            );
                            cache
                                .upsert(hex, CacheEntry::from_record(&record, Utc::now()))
                                .await?;
                            functions[index] = Some(record);
                            ledger.save(target_hexes, &completed(functions)).await?;
                            return Ok(());
                        }
                        Err(err) if err.is_retryable() => {
                            log::warn!("candidate for 0x{hex} rejected: {err}");
                            attempt += 1;
                        }
                        Err(err) => return Err(err),
                    }
                }
                Ok(SearchOutcome::NotFound) => {
                    log::warn!("no candidate for 0x{hex} with prefix {prefix:?}");
                    attempt += 1;
                }
                Err(err) if err.is_retryable() => {
                    log::warn!("worker invocation for 0x{hex} failed: {err}");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Err(MiningError::AttemptsExhausted {
            target: hex.clone(),
            attempts: self.max_attempts,
        })
    }
}

/// Verify a candidate against its target and the set of names already
/// assigned in this run. Hash fidelity is checked before uniqueness.
fn accept(
    index: usize,
    target: &PixelSelector,
    candidate: &Candidate,
    prefix: &str,
    used_names: &mut HashSet<String>,
) -> Result<FunctionRecord> {
    let actual = function_selector(&candidate.signature);
    if actual != target.bytes() {
        return Err(MiningError::SelectorMismatch {
            target: target.to_hex(),
            signature: candidate.signature.clone(),
            actual: hex::encode(actual),
        });
    }
    if used_names.contains(&candidate.func_name) {
        return Err(MiningError::NameCollision(candidate.func_name.clone()));
    }
    used_names.insert(candidate.func_name.clone());

    let seed = candidate
        .func_name
        .trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '_')
        .to_string();
    Ok(FunctionRecord {
        index,
        selector: target.to_hex(),
        func_name: candidate.func_name.clone(),
        signature: candidate.signature.clone(),
        params: String::new(),
        has_param: false,
        seed,
        prefix: prefix.to_string(),
    })
}

fn completed(functions: &[Option<FunctionRecord>]) -> Vec<FunctionRecord> {
    functions.iter().flatten().cloned().collect()
}
