//! Agent Management Core Library
//!
//! Shared types and traits for the agent management API.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (AgentId, CredentialId, TraceId)
//! - [`traits`] - Ownership traits (AgentOwned)
//!
//! # Example
//!
//! ```
//! use agentmgt_core::{AgentId, CredentialId, TraceId};
//!
//! let agent_id = AgentId::new();
//! let credential_id = CredentialId::new();
//! let trace_id = TraceId::new();
//!
//! assert_ne!(agent_id.to_string(), credential_id.to_string());
//! assert_eq!(trace_id.to_string().len(), 36);
//! ```

pub mod ids;
pub mod traits;

pub use ids::{AgentId, CredentialId, ParseIdError, TraceId};
pub use traits::AgentOwned;
