//! Router configuration for the agent management API.

use std::sync::Arc;

use agentmgt_auth::AccessGate;
use agentmgt_core::{AgentId, CredentialId};
use agentmgt_store::{Agent, AgentStore, Credential, CredentialStore, MemoryStore};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::panic_response;
use crate::handlers;
use crate::services::{AgentService, CredentialService, KeyedLocks};

/// Shared state for the agents API.
#[derive(Clone)]
pub struct AgentsState {
    /// Authenticates callers and checks scopes.
    pub gate: Arc<dyn AccessGate>,
    /// Agent service.
    pub agent_service: Arc<AgentService>,
    /// Credential service.
    pub credential_service: Arc<CredentialService>,
}

impl AgentsState {
    /// Wire the services over the given stores.
    ///
    /// Credential mutations lock through the agent service, so agent and
    /// credential mutations on the same agent are serialized.
    pub fn new(
        gate: Arc<dyn AccessGate>,
        agents: Arc<AgentStore>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        let agent_service = Arc::new(AgentService::new(
            agents,
            Arc::clone(&credentials),
            Arc::new(KeyedLocks::new()),
        ));
        let credential_service = Arc::new(CredentialService::new(
            credentials,
            Arc::clone(&agent_service),
        ));

        Self {
            gate,
            agent_service,
            credential_service,
        }
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory(gate: Arc<dyn AccessGate>) -> Self {
        Self::new(
            gate,
            Arc::new(MemoryStore::<AgentId, Agent>::new()),
            Arc::new(MemoryStore::<CredentialId, Credential>::new()),
        )
    }
}

/// Create the agents API router.
///
/// Panics in handlers are rendered as internal errors; request tracing is
/// left to the embedding application.
pub fn agents_router(state: AgentsState) -> Router {
    Router::new()
        // Agent management
        .route(
            "/agents",
            get(handlers::list_agents).post(handlers::create_agent),
        )
        .route(
            "/agents/:agent_id",
            get(handlers::get_agent)
                .put(handlers::update_agent)
                .delete(handlers::delete_agent),
        )
        // Credentials
        .route(
            "/agents/:agent_id/credentials",
            post(handlers::create_credential),
        )
        .route(
            "/agents/:agent_id/credentials/:credential_id",
            get(handlers::get_credential).put(handlers::update_credential),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
