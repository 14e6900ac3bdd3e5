//! Agent management handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use agentmgt_store::Agent;

use crate::error::ApiAgentsError;
use crate::extractors::{ApiJson, ApiPath, Authorized, CreateAgents, DeleteAgents, ReadAgents, UpdateAgents};
use crate::handlers::parse_agent_id;
use crate::models::{CreateAgentRequest, UpdateAgentRequest};
use crate::router::AgentsState;

/// GET /agents - List agents.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/agents",
    tag = "Agents",
    operation_id = "listAgents",
    responses(
        (status = 200, description = "List of agents", body = Vec<Agent>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearerAuth" = []))
))]
pub async fn list_agents(
    _caller: Authorized<ReadAgents>,
    State(state): State<AgentsState>,
) -> Result<Json<Vec<Agent>>, ApiAgentsError> {
    let agents = state.agent_service.list().await?;
    tracing::debug!(count = agents.len(), "Agents listed");
    Ok(Json(agents))
}

/// POST /agents - Register a new agent.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/agents",
    tag = "Agents",
    operation_id = "createAgent",
    request_body = CreateAgentRequest,
    responses(
        (status = 201, description = "Agent created", body = Agent),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearerAuth" = []))
))]
pub async fn create_agent(
    _caller: Authorized<CreateAgents>,
    State(state): State<AgentsState>,
    ApiJson(request): ApiJson<CreateAgentRequest>,
) -> Result<impl IntoResponse, ApiAgentsError> {
    let agent = state.agent_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// GET /agents/{agent_id} - Get an agent.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/agents/{agent_id}",
    tag = "Agents",
    operation_id = "getAgent",
    params(("agent_id" = String, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Agent details", body = Agent),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Agent not found")
    ),
    security(("bearerAuth" = []))
))]
pub async fn get_agent(
    _caller: Authorized<ReadAgents>,
    State(state): State<AgentsState>,
    ApiPath(agent_id): ApiPath<String>,
) -> Result<Json<Agent>, ApiAgentsError> {
    let agent_id = parse_agent_id(&agent_id)?;
    let agent = state.agent_service.get(agent_id).await?;
    Ok(Json(agent))
}

/// PUT /agents/{agent_id} - Merge fields into an agent.
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/agents/{agent_id}",
    tag = "Agents",
    operation_id = "updateAgent",
    params(("agent_id" = String, Path, description = "Agent ID")),
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Agent updated", body = Agent),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Agent not found")
    ),
    security(("bearerAuth" = []))
))]
pub async fn update_agent(
    _caller: Authorized<UpdateAgents>,
    State(state): State<AgentsState>,
    ApiPath(agent_id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateAgentRequest>,
) -> Result<Json<Agent>, ApiAgentsError> {
    let agent_id = parse_agent_id(&agent_id)?;
    let agent = state.agent_service.update(agent_id, request).await?;
    Ok(Json(agent))
}

/// DELETE /agents/{agent_id} - Delete an agent and its credentials.
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/agents/{agent_id}",
    tag = "Agents",
    operation_id = "deleteAgent",
    params(("agent_id" = String, Path, description = "Agent ID")),
    responses(
        (status = 204, description = "Agent deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Agent not found")
    ),
    security(("bearerAuth" = []))
))]
pub async fn delete_agent(
    _caller: Authorized<DeleteAgents>,
    State(state): State<AgentsState>,
    ApiPath(agent_id): ApiPath<String>,
) -> Result<StatusCode, ApiAgentsError> {
    let agent_id = parse_agent_id(&agent_id)?;
    state.agent_service.delete(agent_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
