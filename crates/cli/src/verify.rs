//! Consistency checks over a finished (or in-flight) mining run: hash
//! fidelity, name uniqueness, and an optional comparison against a selector
//! list extracted elsewhere (e.g. from deployed bytecode).

use push4_store::{FunctionRecord, ProgressSnapshot};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub checked: usize,
    /// Records whose recomputed selector disagrees with the stored target.
    pub hash_failures: Vec<String>,
    /// Function names assigned to more than one record.
    pub duplicate_names: Vec<String>,
    pub comparison: Option<Comparison>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.hash_failures.is_empty()
            && self.duplicate_names.is_empty()
            && self
                .comparison
                .as_ref()
                .is_none_or(|c| c.false_positives.is_empty() && c.missing.is_empty())
    }
}

/// Mined set vs. an externally extracted selector list.
#[derive(Debug, Default)]
pub struct Comparison {
    pub correct: Vec<String>,
    /// Present externally but never mined: stray selectors in the artifact.
    pub false_positives: Vec<String>,
    /// Mined but absent externally: dropped by the artifact.
    pub missing: Vec<String>,
}

/// Re-hash every record and hunt for duplicate names.
pub fn check_snapshot(snapshot: &ProgressSnapshot) -> VerifyReport {
    let mut report = VerifyReport {
        checked: snapshot.functions.len(),
        ..VerifyReport::default()
    };

    let mut seen: HashMap<&str, &FunctionRecord> = HashMap::new();
    for record in &snapshot.functions {
        let actual = hex::encode(push4_selectors::function_selector(&record.signature));
        if actual != record.selector {
            report.hash_failures.push(format!(
                "0x{}: {} hashes to 0x{actual}",
                record.selector, record.signature
            ));
        }
        if seen.insert(&record.func_name, record).is_some() {
            report.duplicate_names.push(record.func_name.clone());
        }
    }
    report
}

/// Normalize a selector rendering to lowercase hex without the `0x` prefix.
pub fn normalize_selector(raw: &str) -> String {
    raw.trim()
        .strip_prefix("0x")
        .unwrap_or_else(|| raw.trim())
        .to_ascii_lowercase()
}

/// Partition an external selector list against the mined set.
pub fn compare(mined: &[String], external: &[String]) -> Comparison {
    let mined_set: HashSet<String> = mined.iter().map(|s| normalize_selector(s)).collect();
    let external_set: HashSet<String> = external.iter().map(|s| normalize_selector(s)).collect();

    let mut comparison = Comparison::default();
    for selector in &external_set {
        if mined_set.contains(selector) {
            comparison.correct.push(selector.clone());
        } else {
            comparison.false_positives.push(selector.clone());
        }
    }
    for selector in &mined_set {
        if !external_set.contains(selector) {
            comparison.missing.push(selector.clone());
        }
    }
    comparison.correct.sort();
    comparison.false_positives.sort();
    comparison.missing.sort();
    comparison
}

/// Explain a stray selector: decompose it into color bytes plus column byte
/// and list mined selectors sharing the color but not the column.
pub fn describe_false_positive(selector_hex: &str, mined: &[String]) -> Vec<String> {
    let hex = normalize_selector(selector_hex);
    let mut lines = Vec::new();
    let Ok(bytes) = hex::decode(&hex) else {
        lines.push(format!("  not an 8-char hex selector: {selector_hex}"));
        return lines;
    };
    if bytes.len() != 4 {
        lines.push(format!("  not an 8-char hex selector: {selector_hex}"));
        return lines;
    }

    lines.push(format!(
        "  RGB: ({}, {}, {}), column byte: {} (0x{})",
        bytes[0],
        bytes[1],
        bytes[2],
        bytes[3],
        &hex[6..8]
    ));

    let color = &hex[..6];
    let sharing: Vec<&String> = mined
        .iter()
        .filter(|m| normalize_selector(m).starts_with(color))
        .collect();
    if sharing.is_empty() {
        lines.push("  color matches no mined selector".to_string());
    } else {
        for m in sharing {
            lines.push(format!("  color matches mined selector 0x{}", normalize_selector(m)));
        }
    }
    lines
}
