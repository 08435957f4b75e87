use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Serialize `value` as pretty JSON and move it into place via a sibling
/// temp file, so an interruption mid-write leaves the previous file intact.
pub(crate) async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_cleans_up_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        write_json_atomic(&path, &serde_json::json!({"ok": true}))
            .await
            .expect("write");

        let raw = tokio::fs::read_to_string(&path).await.expect("read back");
        assert!(raw.contains("\"ok\""));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deep").join("state.json");

        write_json_atomic(&path, &serde_json::json!([1, 2, 3]))
            .await
            .expect("write");
        assert!(path.exists());
    }
}
