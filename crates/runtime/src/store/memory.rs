//! In-memory store for tests, previews, and hosts without a data directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::{KeyValueStore, Result, StoreError};

/// In-memory implementation of [`KeyValueStore`].
pub struct InMemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create with values already saved, as if a previous session wrote them.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(key, value)| (key.into(), value))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("hp").await.unwrap(), None);

        store.set("hp", json!({"current": 4})).await.unwrap();
        assert_eq!(store.get("hp").await.unwrap(), Some(json!({"current": 4})));
        assert!(store.contains("hp").await.unwrap());

        store.remove("hp").await.unwrap();
        store.remove("hp").await.unwrap();
        assert!(!store.contains("hp").await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_are_sorted() {
        let store = InMemoryStore::with_values([("b", json!(1)), ("a", json!(2))]);
        assert_eq!(store.keys().await.unwrap(), ["a", "b"]);
    }
}
