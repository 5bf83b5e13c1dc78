//! Store contract shared by the in-memory and file-backed implementations.

use async_trait::async_trait;
use serde_json::Value;

use super::Result;

/// Asynchronous key-value persistence for widget state.
///
/// Values are complete replacement states, never patches. Keys are opaque;
/// two widgets only share one when the author aliases them on purpose.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the value saved under `key`, or `None` if nothing was saved.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Save `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently saved, sorted.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Check if a key exists.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
