//! In-memory store backend.

use async_trait::async_trait;
use dashmap::DashMap;
use std::hash::Hash;

use crate::error::StoreError;
use crate::store::ResourceStore;

/// Concurrent in-memory store backed by a sharded hash map.
#[derive(Debug)]
pub struct MemoryStore<K, V>
where
    K: Eq + Hash,
{
    records: DashMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> ResourceStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: K, value: V) -> Result<(), StoreError> {
        self.records.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &K) -> Result<Option<V>, StoreError> {
        Ok(self.records.remove(key).map(|(_, value)| value))
    }

    async fn values(&self) -> Result<Vec<V>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
