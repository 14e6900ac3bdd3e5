//! Business logic for the agent management API.

pub mod agent_service;
pub mod credential_service;
pub mod locks;
pub mod validation;

pub use agent_service::AgentService;
pub use credential_service::CredentialService;
pub use locks::KeyedLocks;
