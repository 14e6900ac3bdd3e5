//! Credential handlers.
//!
//! Responses are always [`CredentialView`]s; stored details never leave the
//! service layer. Bodies are taken as plain JSON and read only after the
//! agent and credential have been resolved.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use agentmgt_core::{AgentId, CredentialId};
use serde_json::Value;

use crate::error::ApiAgentsError;
use crate::extractors::{ApiJson, ApiPath, Authorized, ReadAgents, UpdateAgents};
use crate::handlers::parse_agent_id;
use crate::models::{CredentialRequest, CredentialView};
use crate::router::AgentsState;

/// Resolve a credential path id.
///
/// An id that does not parse is reported as a missing credential, but only
/// after the agent itself has been found.
async fn resolve_credential_id(
    state: &AgentsState,
    agent_id: AgentId,
    raw: &str,
) -> Result<CredentialId, ApiAgentsError> {
    match raw.parse() {
        Ok(id) => Ok(id),
        Err(_) => {
            state.credential_service.require_agent(agent_id).await?;
            Err(ApiAgentsError::CredentialNotFound(raw.to_string()))
        }
    }
}

/// POST /agents/{agent_id}/credentials - Add a credential to an agent.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/agents/{agent_id}/credentials",
    tag = "Credentials",
    operation_id = "createCredential",
    params(("agent_id" = String, Path, description = "Agent ID")),
    request_body = CredentialRequest,
    responses(
        (status = 201, description = "Credential created", body = CredentialView),
        (status = 400, description = "Invalid credential type"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Agent not found")
    ),
    security(("bearerAuth" = []))
))]
pub async fn create_credential(
    _caller: Authorized<UpdateAgents>,
    State(state): State<AgentsState>,
    ApiPath(agent_id): ApiPath<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, ApiAgentsError> {
    let agent_id = parse_agent_id(&agent_id)?;
    let view = state
        .credential_service
        .create(agent_id, CredentialRequest::from_body(body))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /agents/{agent_id}/credentials/{credential_id} - Get a credential, masked.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/agents/{agent_id}/credentials/{credential_id}",
    tag = "Credentials",
    operation_id = "getCredential",
    params(
        ("agent_id" = String, Path, description = "Agent ID"),
        ("credential_id" = String, Path, description = "Credential ID")
    ),
    responses(
        (status = 200, description = "Credential", body = CredentialView),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Agent or credential not found")
    ),
    security(("bearerAuth" = []))
))]
pub async fn get_credential(
    _caller: Authorized<ReadAgents>,
    State(state): State<AgentsState>,
    ApiPath((agent_id, credential_id)): ApiPath<(String, String)>,
) -> Result<Json<CredentialView>, ApiAgentsError> {
    let agent_id = parse_agent_id(&agent_id)?;
    let credential_id = resolve_credential_id(&state, agent_id, &credential_id).await?;
    let view = state
        .credential_service
        .get(agent_id, credential_id)
        .await?;
    Ok(Json(view))
}

/// PUT /agents/{agent_id}/credentials/{credential_id} - Replace credential details.
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/agents/{agent_id}/credentials/{credential_id}",
    tag = "Credentials",
    operation_id = "updateCredential",
    params(
        ("agent_id" = String, Path, description = "Agent ID"),
        ("credential_id" = String, Path, description = "Credential ID")
    ),
    request_body = CredentialRequest,
    responses(
        (status = 200, description = "Credential updated", body = CredentialView),
        (status = 400, description = "Invalid or changed credential type"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Agent or credential not found")
    ),
    security(("bearerAuth" = []))
))]
pub async fn update_credential(
    _caller: Authorized<UpdateAgents>,
    State(state): State<AgentsState>,
    ApiPath((agent_id, credential_id)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<CredentialView>, ApiAgentsError> {
    let agent_id = parse_agent_id(&agent_id)?;
    let credential_id = resolve_credential_id(&state, agent_id, &credential_id).await?;
    let view = state
        .credential_service
        .update(agent_id, credential_id, CredentialRequest::from_body(body))
        .await?;
    Ok(Json(view))
}
