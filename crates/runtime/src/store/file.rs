//! File-backed store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;

use super::{KeyValueStore, Result, StoreError};

/// File-based implementation of [`KeyValueStore`].
///
/// # File Format
///
/// Every key lives in one pretty-printed JSON object, the same shape the host
/// application keeps its plugin data in:
///
/// ```text
/// { "aria-hp": { "current": 12, "temporary": 0, "hitdiceUsed": 1 }, ... }
/// ```
///
/// Writes go to `<file>.tmp` first and are renamed over the original, so a
/// crash mid-write leaves the previous contents intact. Read-modify-write
/// cycles are serialized through an async mutex.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`, creating its parent directory.
    ///
    /// The file itself is created on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice(&bytes).map_err(|e| StoreError::Json(e.to_string()))? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::CorruptedData),
        }
    }

    async fn write_all(&self, values: &Map<String, Value>) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(values).map_err(|e| StoreError::Json(e.to_string()))?;

        // Write to temp file
        fs::write(&temp_path, bytes).await?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_all().await?;
        Ok(values.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value);
        self.write_all(&values).await?;

        tracing::debug!("Saved {} to {}", key, self.path.display());

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_all().await?;
        if values.remove(key).is_some() {
            self.write_all(&values).await?;
            tracing::debug!("Removed {} from {}", key, self.path.display());
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        let mut keys: Vec<String> = self.read_all().await?.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.get("slots").await.unwrap(), None);
        store.set("slots", json!({"value": 2})).await.unwrap();
        store.set("hp", json!({"current": 9})).await.unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("slots").await.unwrap(),
            Some(json!({"value": 2}))
        );
        assert_eq!(reopened.keys().await.unwrap(), ["hp", "slots"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data.json")).await.unwrap();
        store.set("a", json!(1)).await.unwrap();
        store.remove("a").await.unwrap();
        store.remove("missing").await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_file_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let store = FileStore::open(&path).await.unwrap();
        assert!(matches!(
            store.get("a").await,
            Err(StoreError::CorruptedData)
        ));
    }
}
