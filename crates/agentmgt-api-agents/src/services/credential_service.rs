//! Credential lifecycle service.
//!
//! Credentials are bound to one agent for life. Every mutation holds the
//! parent agent's lock and re-checks that the agent still exists, so a
//! credential can never be created under an agent that is being deleted.
//! Details are stored as given and only ever returned masked.

use std::sync::Arc;

use agentmgt_core::{AgentId, AgentOwned, CredentialId};
use agentmgt_store::{Credential, CredentialStore};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiAgentsError;
use crate::models::{CredentialRequest, CredentialView};
use crate::services::agent_service::AgentService;
use crate::services::validation::{ensure_same_credential_type, parse_credential_type};

/// Service for credential operations.
pub struct CredentialService {
    credentials: Arc<CredentialStore>,
    agent_service: Arc<AgentService>,
}

impl CredentialService {
    /// Create a new `CredentialService`.
    ///
    /// Mutations take the parent agent's lock through `agent_service`.
    pub fn new(credentials: Arc<CredentialStore>, agent_service: Arc<AgentService>) -> Self {
        Self {
            credentials,
            agent_service,
        }
    }

    /// Create a credential for an agent.
    pub async fn create(
        &self,
        agent_id: AgentId,
        request: CredentialRequest,
    ) -> Result<CredentialView, ApiAgentsError> {
        let _guard = self.agent_service.lock_existing(agent_id).await?;

        let credential_type = parse_credential_type(request.credential_type.as_deref())?;

        let credential = Credential::new(
            agent_id,
            credential_type,
            request.credential_details.unwrap_or(Value::Null),
        );
        self.credentials
            .set(credential.credential_id, credential.clone())
            .await?;

        info!(
            agent_id = %agent_id,
            credential_id = %credential.credential_id,
            credential_type = %credential_type,
            "Credential created"
        );

        Ok(CredentialView::from(&credential))
    }

    /// Get a credential, masked.
    pub async fn get(
        &self,
        agent_id: AgentId,
        credential_id: CredentialId,
    ) -> Result<CredentialView, ApiAgentsError> {
        self.require_agent(agent_id).await?;
        let credential = self.owned_credential(agent_id, credential_id).await?;

        debug!(agent_id = %agent_id, credential_id = %credential_id, "Credential fetched");

        Ok(CredentialView::from(&credential))
    }

    /// Replace a credential's details. The type is write-once.
    pub async fn update(
        &self,
        agent_id: AgentId,
        credential_id: CredentialId,
        request: CredentialRequest,
    ) -> Result<CredentialView, ApiAgentsError> {
        let _guard = self.agent_service.lock_existing(agent_id).await?;

        let mut credential = self.owned_credential(agent_id, credential_id).await?;
        ensure_same_credential_type(
            credential.credential_type,
            request.credential_type.as_deref(),
        )?;

        credential.credential_details = request.credential_details.unwrap_or(Value::Null);
        self.credentials
            .set(credential_id, credential.clone())
            .await?;

        info!(agent_id = %agent_id, credential_id = %credential_id, "Credential updated");

        Ok(CredentialView::from(&credential))
    }

    /// Report `AgentNotFound` unless the agent exists.
    ///
    /// Exposed so handlers can report a missing agent before they look at
    /// the credential id or the request body.
    pub async fn require_agent(&self, agent_id: AgentId) -> Result<(), ApiAgentsError> {
        if self.agent_service.exists(agent_id).await? {
            Ok(())
        } else {
            Err(ApiAgentsError::AgentNotFound(agent_id.to_string()))
        }
    }

    async fn owned_credential(
        &self,
        agent_id: AgentId,
        credential_id: CredentialId,
    ) -> Result<Credential, ApiAgentsError> {
        let credential = self
            .credentials
            .get(&credential_id)
            .await?
            .ok_or_else(|| ApiAgentsError::CredentialNotFound(credential_id.to_string()))?;

        if !credential.is_owned_by(agent_id) {
            return Err(ApiAgentsError::CredentialNotOwned {
                agent_id,
                credential_id,
            });
        }

        Ok(credential)
    }
}
