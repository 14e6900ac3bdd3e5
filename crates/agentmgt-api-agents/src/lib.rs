//! Agent management REST API.
//!
//! This crate provides the HTTP surface for registering agents and managing
//! the credentials bound to them.
//!
//! # Features
//!
//! - **Agent Management**: Register, read, update and delete agents
//! - **Credentials**: Attach credentials to agents; details are write-only
//!   and every response carries a masked view
//! - **Cascade Delete**: Deleting an agent removes all of its credentials
//! - **Scope Gating**: Every endpoint requires one
//!   `internal_org_agent_mgt_*` scope
//!
//! # Example
//!
//! ```rust,ignore
//! use agentmgt_api_agents::{agents_router, AgentsState};
//! use axum::Router;
//!
//! let state = AgentsState::in_memory(gate);
//! let app = Router::new().merge(agents_router(state));
//! ```
//!
//! # Endpoints
//!
//! - `GET /agents` - List agents
//! - `POST /agents` - Register a new agent
//! - `GET /agents/{id}` - Get agent details
//! - `PUT /agents/{id}` - Merge fields into an agent
//! - `DELETE /agents/{id}` - Delete agent and its credentials
//! - `POST /agents/{id}/credentials` - Add a credential
//! - `GET /agents/{id}/credentials/{credential_id}` - Get a credential (masked)
//! - `PUT /agents/{id}/credentials/{credential_id}` - Replace credential details

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::{panic_response, ApiAgentsError, ErrorKind, ErrorResponse};
pub use models::{CreateAgentRequest, CredentialRequest, CredentialView, UpdateAgentRequest};
pub use router::{agents_router, AgentsState};
