//! Ownership Traits
//!
//! Records that belong to exactly one agent implement [`AgentOwned`], which
//! lets services verify the parent/child link without knowing the concrete
//! record type.
//!
//! # Example
//!
//! ```
//! use agentmgt_core::{AgentId, AgentOwned};
//!
//! struct ApiKey {
//!     agent_id: AgentId,
//! }
//!
//! impl AgentOwned for ApiKey {
//!     fn agent_id(&self) -> AgentId {
//!         self.agent_id
//!     }
//! }
//!
//! let owner = AgentId::new();
//! let key = ApiKey { agent_id: owner };
//! assert!(key.is_owned_by(owner));
//! assert!(!key.is_owned_by(AgentId::new()));
//! ```

use crate::ids::AgentId;

/// Trait for records bound to a parent agent.
///
/// The parent link is immutable: once created, a record is never moved to
/// another agent.
pub trait AgentOwned {
    /// Returns the id of the owning agent.
    fn agent_id(&self) -> AgentId;

    /// Returns true if the record belongs to `agent_id`.
    fn is_owned_by(&self, agent_id: AgentId) -> bool {
        self.agent_id() == agent_id
    }
}
