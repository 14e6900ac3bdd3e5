//! Axum extractors for the agent management API.

use std::marker::PhantomData;

use agentmgt_auth::{Principal, Scope};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::ApiAgentsError;
use crate::router::AgentsState;

/// Marker naming the scope an endpoint requires.
pub trait RequiredScope: Send + Sync + 'static {
    /// The scope checked by [`Authorized`].
    const SCOPE: Scope;
}

/// Requires `internal_org_agent_mgt_read`.
#[derive(Debug)]
pub struct ReadAgents;

/// Requires `internal_org_agent_mgt_create`.
#[derive(Debug)]
pub struct CreateAgents;

/// Requires `internal_org_agent_mgt_update`.
#[derive(Debug)]
pub struct UpdateAgents;

/// Requires `internal_org_agent_mgt_delete`.
#[derive(Debug)]
pub struct DeleteAgents;

impl RequiredScope for ReadAgents {
    const SCOPE: Scope = Scope::AgentRead;
}

impl RequiredScope for CreateAgents {
    const SCOPE: Scope = Scope::AgentCreate;
}

impl RequiredScope for UpdateAgents {
    const SCOPE: Scope = Scope::AgentUpdate;
}

impl RequiredScope for DeleteAgents {
    const SCOPE: Scope = Scope::AgentDelete;
}

/// A caller that passed the access gate for scope `S`.
///
/// Must be the first extractor of a handler so that rejected callers never
/// reach body parsing or the stores.
#[derive(Debug)]
pub struct Authorized<S: RequiredScope> {
    pub principal: Principal,
    _scope: PhantomData<S>,
}

#[async_trait]
impl<S> FromRequestParts<AgentsState> for Authorized<S>
where
    S: RequiredScope,
{
    type Rejection = ApiAgentsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AgentsState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let principal = state
            .gate
            .authenticate_and_authorize(authorization, S::SCOPE)?;

        tracing::debug!(subject = %principal.subject, scope = %S::SCOPE, "Caller authorized");

        Ok(Self {
            principal,
            _scope: PhantomData,
        })
    }
}

/// Path parameters whose rejections render as `InvalidInput`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiAgentsError))]
pub struct ApiPath<T>(pub T);

/// JSON body whose rejections render as `InvalidInput`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiAgentsError))]
pub struct ApiJson<T>(pub T);
