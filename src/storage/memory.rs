//! Implements the `Storage` trait in memory, for tests and for running without a database file.

use crate::error::Res;
use crate::storage::Storage;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// An implementation of `Storage` that holds everything in a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new `MemoryStorage` seeded with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// A copy of everything currently stored.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.data.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        Ok(self.data.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Res<()> {
        self.data
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Res<()> {
        self.data.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("a").await.unwrap(), None);
        storage.set("a", "1").await.unwrap();
        storage.set("a", "2").await.unwrap();
        assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("2"));
        storage.remove("a").await.unwrap();
        storage.remove("a").await.unwrap();
        assert_eq!(storage.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_seeded() {
        let storage = MemoryStorage::with_entries([("k", "v")]);
        assert_eq!(storage.snapshot().await.len(), 1);
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
