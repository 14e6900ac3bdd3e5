//! HTTP handlers for the agent management API.

pub mod agents;
pub mod credentials;

pub use agents::{create_agent, delete_agent, get_agent, list_agents, update_agent};
pub use credentials::{create_credential, get_credential, update_credential};

use agentmgt_core::AgentId;

use crate::error::ApiAgentsError;

/// An agent id that does not parse names no agent.
pub(crate) fn parse_agent_id(raw: &str) -> Result<AgentId, ApiAgentsError> {
    raw.parse()
        .map_err(|_| ApiAgentsError::AgentNotFound(raw.to_string()))
}
