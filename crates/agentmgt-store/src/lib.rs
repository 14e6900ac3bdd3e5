//! Storage layer for the agent management API.
//!
//! This crate provides:
//! - The [`ResourceStore`] contract (get/set/delete/iterate) used identically
//!   for the agent and credential collections
//! - [`MemoryStore`], a concurrent in-memory backend
//! - The persisted records: [`Agent`], [`Credential`] and [`CredentialType`]
//!
//! # Example
//!
//! ```rust,ignore
//! use agentmgt_store::{Agent, MemoryStore, ResourceStore};
//!
//! let agents: MemoryStore<AgentId, Agent> = MemoryStore::new();
//! agents.set(agent.id, agent.clone()).await?;
//! let found = agents.get(&agent.id).await?;
//! ```

mod error;
mod memory;
pub mod models;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{Agent, Credential, CredentialType};
pub use store::{AgentStore, CredentialStore, ResourceStore};
