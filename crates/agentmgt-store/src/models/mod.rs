//! Persisted records.

pub mod agent;
pub mod credential;

pub use agent::Agent;
pub use credential::{Credential, CredentialType};
