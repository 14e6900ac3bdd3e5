//! Payload validation for agent and credential requests.
//!
//! Pure functions: they inspect a request and either produce the values to
//! persist or the `InvalidInput` error to report. No store access.

use agentmgt_store::{Agent, CredentialType};
use serde_json::{Map, Value};

use crate::error::ApiAgentsError;
use crate::models::requests::scalar_string;
use crate::models::{CreateAgentRequest, UpdateAgentRequest};

/// Server-managed agent fields; silently ignored in updates.
const READ_ONLY_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Attributes of an agent about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
    pub version: String,
    pub url: Option<String>,
    pub owner: Option<String>,
}

/// Validate a create request.
///
/// `name`, `description` and `version` must be present and non-empty.
/// Empty `url` or `owner` are treated as absent.
pub fn validate_new_agent(request: CreateAgentRequest) -> Result<NewAgent, ApiAgentsError> {
    let name = required(request.name)?;
    let description = required(request.description)?;
    let version = required(request.version)?;

    Ok(NewAgent {
        name,
        description,
        version,
        url: request.url.filter(|s| !s.is_empty()),
        owner: request.owner.filter(|s| !s.is_empty()),
    })
}

fn required(value: Option<String>) -> Result<String, ApiAgentsError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or(ApiAgentsError::MissingAgentAttributes)
}

/// Validated partial update of an agent.
///
/// `None` leaves a field untouched. For `url` and `owner`, `Some(None)`
/// clears the field. `extra` holds attributes without a dedicated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub url: Option<Option<String>>,
    pub owner: Option<Option<String>>,
    pub extra: Map<String, Value>,
}

impl AgentPatch {
    /// Merge into `agent`. Timestamps are left to the caller.
    pub fn apply_to(self, agent: &mut Agent) {
        if let Some(name) = self.name {
            agent.name = name;
        }
        if let Some(description) = self.description {
            agent.description = description;
        }
        if let Some(version) = self.version {
            agent.version = version;
        }
        if let Some(url) = self.url {
            agent.url = url;
        }
        if let Some(owner) = self.owner {
            agent.owner = owner;
        }
        agent.extra.extend(self.extra);
    }
}

/// Turn an update request into a patch.
///
/// The only rejection is an empty payload. Scalars sent for text attributes
/// are stored as text. A value with no text form leaves a required
/// attribute as it was; `null` clears `url` or `owner`. The server-managed
/// `id`, `createdAt` and `updatedAt` are ignored. Every other key is merged
/// as given.
pub fn validate_agent_patch(request: UpdateAgentRequest) -> Result<AgentPatch, ApiAgentsError> {
    if request.fields.is_empty() {
        return Err(ApiAgentsError::EmptyUpdate);
    }

    let mut patch = AgentPatch::default();
    for (key, value) in request.fields {
        match key.as_str() {
            "name" => patch.name = text_field(&key, value),
            "description" => patch.description = text_field(&key, value),
            "version" => patch.version = text_field(&key, value),
            "url" => patch.url = nullable_text_field(&key, value),
            "owner" => patch.owner = nullable_text_field(&key, value),
            k if READ_ONLY_FIELDS.contains(&k) => {
                tracing::debug!(field = k, "Ignoring server-managed field in agent update");
            }
            _ => {
                patch.extra.insert(key, value);
            }
        }
    }

    Ok(patch)
}

fn text_field(key: &str, value: Value) -> Option<String> {
    let text = scalar_string(value);
    if text.is_none() {
        tracing::debug!(field = key, "Keeping stored value for non-text update");
    }
    text
}

fn nullable_text_field(key: &str, value: Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        other => text_field(key, other).map(Some),
    }
}

/// Parse a supplied credential type. Matching is exact.
pub fn parse_credential_type(raw: Option<&str>) -> Result<CredentialType, ApiAgentsError> {
    raw.and_then(|s| s.parse().ok())
        .ok_or(ApiAgentsError::InvalidCredentialType)
}

/// Check that an update keeps the stored credential type.
///
/// A missing or unrecognized type is `InvalidCredentialType`; a valid but
/// different one is `CredentialTypeImmutable`.
pub fn ensure_same_credential_type(
    stored: CredentialType,
    supplied: Option<&str>,
) -> Result<(), ApiAgentsError> {
    let supplied = parse_credential_type(supplied)?;
    if supplied != stored {
        return Err(ApiAgentsError::CredentialTypeImmutable);
    }
    Ok(())
}
