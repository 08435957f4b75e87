use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One mined function, positioned within the current run's target list.
///
/// `func_name` hashed (keccak-256, truncated to 4 bytes) through `signature`
/// reproduces `selector`. Names are globally unique within a run; the hash,
/// not the name, carries the meaning, but a duplicate name would corrupt the
/// generated contract interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub index: usize,
    /// Target selector as lowercase hex, no `0x` prefix.
    pub selector: String,
    pub func_name: String,
    pub signature: String,
    #[serde(default)]
    pub params: String,
    #[serde(default)]
    pub has_param: bool,
    pub seed: String,
    pub prefix: String,
}

/// Persisted analog of [`FunctionRecord`], keyed externally by selector hex.
/// Position-independent: the `index` is rewritten when an entry is reused in
/// a later run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub func_name: String,
    pub signature: String,
    #[serde(default)]
    pub params: String,
    #[serde(default)]
    pub has_param: bool,
    pub seed: String,
    pub prefix: String,
    pub mined_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn from_record(record: &FunctionRecord, mined_at: DateTime<Utc>) -> Self {
        Self {
            func_name: record.func_name.clone(),
            signature: record.signature.clone(),
            params: record.params.clone(),
            has_param: record.has_param,
            seed: record.seed.clone(),
            prefix: record.prefix.clone(),
            mined_at,
        }
    }

    /// Rehydrate a record for the given position in the current run.
    pub fn to_record(&self, index: usize, selector: &str) -> FunctionRecord {
        FunctionRecord {
            index,
            selector: selector.to_string(),
            func_name: self.func_name.clone(),
            signature: self.signature.clone(),
            params: self.params.clone(),
            has_param: self.has_param,
            seed: self.seed.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

/// One in-flight generation run, rewritten after every resolved target.
/// May be partial; entries reconcile by selector value, never by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub timestamp: DateTime<Utc>,
    /// Every target of the run as lowercase hex, in derivation order.
    pub selectors_data: Vec<String>,
    pub completed: usize,
    pub total: usize,
    pub functions: Vec<FunctionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> FunctionRecord {
        FunctionRecord {
            index: 7,
            selector: "4f302900".to_string(),
            func_name: "f4075".to_string(),
            signature: "f4075()".to_string(),
            params: String::new(),
            has_param: false,
            seed: "4075".to_string(),
            prefix: "f".to_string(),
        }
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_value(record()).expect("serialize");
        assert_eq!(json["funcName"], "f4075");
        assert_eq!(json["hasParam"], false);
        assert_eq!(json["selector"], "4f302900");
    }

    #[test]
    fn cache_entry_roundtrips_through_record() {
        let mined_at = Utc::now();
        let entry = CacheEntry::from_record(&record(), mined_at);
        let back = entry.to_record(11, "aabbcc0e");
        assert_eq!(back.index, 11);
        assert_eq!(back.selector, "aabbcc0e");
        assert_eq!(back.func_name, "f4075");
        assert_eq!(back.prefix, "f");
    }

    #[test]
    fn snapshot_wire_format_is_stable() {
        let snapshot = ProgressSnapshot {
            timestamp: Utc::now(),
            selectors_data: vec!["4f302900".to_string()],
            completed: 1,
            total: 375,
            functions: vec![record()],
        };
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert!(json["selectorsData"].is_array());
        assert_eq!(json["completed"], 1);
        assert_eq!(json["total"], 375);
        assert!(json["functions"][0]["funcName"].is_string());
    }
}
