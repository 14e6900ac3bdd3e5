//! The resource store contract.

use agentmgt_core::{AgentId, CredentialId};
use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Agent, Credential};

/// Abstract mapping from identifier to record.
///
/// Implementations must be safe to share across tasks. Individual calls are
/// atomic; multi-call sequences are serialized by the caller.
#[async_trait]
pub trait ResourceStore<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Fetch the record stored under `key`.
    async fn get(&self, key: &K) -> Result<Option<V>, StoreError>;

    /// Insert or replace the record stored under `key`.
    async fn set(&self, key: K, value: V) -> Result<(), StoreError>;

    /// Remove the record stored under `key`, returning it if present.
    async fn delete(&self, key: &K) -> Result<Option<V>, StoreError>;

    /// Snapshot of every stored record.
    async fn values(&self) -> Result<Vec<V>, StoreError>;
}

/// Store holding the agent collection.
pub type AgentStore = dyn ResourceStore<AgentId, Agent>;

/// Store holding the credential collection.
pub type CredentialStore = dyn ResourceStore<CredentialId, Credential>;
