//! Agent lifecycle service.
//!
//! Owns the agent collection and enforces the agent-to-credential
//! relationship: deleting an agent deletes its credentials first, under the
//! agent's lock, so no credential ever outlives its agent.

use std::sync::Arc;

use agentmgt_core::{AgentId, AgentOwned};
use agentmgt_store::{Agent, AgentStore, CredentialStore};
use chrono::Utc;
use tokio::sync::OwnedMutexGuard;
use tracing::info;

use crate::error::ApiAgentsError;
use crate::models::{CreateAgentRequest, UpdateAgentRequest};
use crate::services::locks::KeyedLocks;
use crate::services::validation::{validate_agent_patch, validate_new_agent};

/// Service for agent operations.
pub struct AgentService {
    agents: Arc<AgentStore>,
    credentials: Arc<CredentialStore>,
    locks: Arc<KeyedLocks<AgentId>>,
}

impl AgentService {
    /// Create a new `AgentService`.
    pub fn new(
        agents: Arc<AgentStore>,
        credentials: Arc<CredentialStore>,
        locks: Arc<KeyedLocks<AgentId>>,
    ) -> Self {
        Self {
            agents,
            credentials,
            locks,
        }
    }

    /// List every agent, oldest first. Ties break on id.
    pub async fn list(&self) -> Result<Vec<Agent>, ApiAgentsError> {
        let mut agents = self.agents.values().await?;
        agents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(agents)
    }

    /// Register a new agent.
    pub async fn create(&self, request: CreateAgentRequest) -> Result<Agent, ApiAgentsError> {
        let new = validate_new_agent(request)?;
        let agent = Agent::new(
            new.name,
            new.description,
            new.version,
            new.url,
            new.owner,
            Utc::now(),
        );

        self.agents.set(agent.id, agent.clone()).await?;

        info!(agent_id = %agent.id, name = %agent.name, "Agent created");

        Ok(agent)
    }

    /// Get an agent by id.
    pub async fn get(&self, agent_id: AgentId) -> Result<Agent, ApiAgentsError> {
        self.agents
            .get(&agent_id)
            .await?
            .ok_or_else(|| ApiAgentsError::AgentNotFound(agent_id.to_string()))
    }

    /// Whether the agent currently exists.
    pub async fn exists(&self, agent_id: AgentId) -> Result<bool, ApiAgentsError> {
        Ok(self.agents.get(&agent_id).await?.is_some())
    }

    /// Take the agent's lock, provided the agent exists.
    ///
    /// When it does not, or the lookup fails, the lock entry is released
    /// again so unknown ids never accumulate in the lock map.
    pub(crate) async fn lock_existing(
        &self,
        agent_id: AgentId,
    ) -> Result<OwnedMutexGuard<()>, ApiAgentsError> {
        let guard = self.locks.lock(&agent_id).await;

        match self.exists(agent_id).await {
            Ok(true) => Ok(guard),
            Ok(false) => {
                self.locks.release(&agent_id, guard);
                Err(ApiAgentsError::AgentNotFound(agent_id.to_string()))
            }
            Err(e) => {
                self.locks.release(&agent_id, guard);
                Err(e)
            }
        }
    }

    /// Merge a partial update into an agent and refresh `updatedAt`.
    ///
    /// A missing agent is reported before an empty payload.
    pub async fn update(
        &self,
        agent_id: AgentId,
        request: UpdateAgentRequest,
    ) -> Result<Agent, ApiAgentsError> {
        let _guard = self.lock_existing(agent_id).await?;

        let mut agent = self.get(agent_id).await?;
        let patch = validate_agent_patch(request)?;

        patch.apply_to(&mut agent);
        agent.updated_at = Utc::now().max(agent.created_at);

        self.agents.set(agent_id, agent.clone()).await?;

        info!(agent_id = %agent_id, "Agent updated");

        Ok(agent)
    }

    /// Delete an agent together with every credential it owns.
    ///
    /// Credentials go first; if any removal fails the agent is kept and the
    /// delete can be retried.
    pub async fn delete(&self, agent_id: AgentId) -> Result<(), ApiAgentsError> {
        let guard = self.lock_existing(agent_id).await?;

        let owned: Vec<_> = self
            .credentials
            .values()
            .await?
            .into_iter()
            .filter(|c| c.is_owned_by(agent_id))
            .collect();

        for credential in &owned {
            self.credentials.delete(&credential.credential_id).await?;
        }

        self.agents.delete(&agent_id).await?;

        self.locks.release(&agent_id, guard);

        info!(
            agent_id = %agent_id,
            credentials_removed = owned.len(),
            "Agent deleted"
        );

        Ok(())
    }
}
