//! Per-key mutual exclusion.
//!
//! Every mutation that reads and then writes state scoped to one agent holds
//! that agent's lock for the whole sequence. Operations on different agents
//! never contend.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A lazily populated map of async mutexes, one per key.
#[derive(Debug)]
pub struct KeyedLocks<K>
where
    K: Eq + Hash,
{
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty lock map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: &K) -> OwnedMutexGuard<()> {
        let mutex = {
            let entry = self
                .locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };
        mutex.lock_owned().await
    }

    /// Release `guard` and drop the entry for `key` unless another task is
    /// waiting on it.
    ///
    /// Used once a key is known not to name a live resource, so probing
    /// absent keys leaves the map unchanged. Waiters keep their handle to the
    /// mutex and release it the same way when they are done.
    pub fn release(&self, key: &K, guard: OwnedMutexGuard<()>) {
        // One reference held by the map, one by `guard`.
        self.locks
            .remove_if(key, |_, mutex| Arc::strong_count(mutex) <= 2);
        drop(guard);
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no keys are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::<u32>::new());
        let guard = locks.lock(&1).await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock(&1).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = KeyedLocks::<u32>::new();
        let _a = locks.lock(&1).await;
        let _b = tokio::time::timeout(Duration::from_millis(100), locks.lock(&2))
            .await
            .unwrap();
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_release_removes_idle_entry() {
        let locks = KeyedLocks::<u32>::new();
        let guard = locks.lock(&1).await;
        locks.release(&1, guard);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_release_keeps_entry_with_waiter() {
        let locks = Arc::new(KeyedLocks::<u32>::new());
        let guard = locks.lock(&1).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let guard = locks.lock(&1).await;
                locks.release(&1, guard);
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        locks.release(&1, guard);
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
