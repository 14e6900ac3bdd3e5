//! Request DTOs for the agent management API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Text form of a JSON scalar.
///
/// Numbers and booleans are rendered as text. Null, arrays and objects have
/// no text form.
pub(crate) fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_string))
}

// ============================================================================
// Agent Requests
// ============================================================================

/// Request to register a new agent.
///
/// Required attributes are optional at the type level so that a missing
/// field is reported as a validation failure rather than a parse failure.
/// Scalars are read as text; any other value counts as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    /// Display name. Required, non-empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Description. Required, non-empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,

    /// Software version. Required, non-empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,

    /// Endpoint URL. Empty is stored as absent.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,

    /// Owner. Empty is stored as absent.
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner: Option<String>,
}

/// Partial update of an agent.
///
/// Kept as a raw object: the set of keys present matters, an explicit
/// `null` clears `url` or `owner`, and keys that are not agent attributes
/// are merged into the stored record as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct UpdateAgentRequest {
    /// Fields to merge into the stored agent.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub fields: Map<String, Value>,
}

impl UpdateAgentRequest {
    /// Build from an already-parsed object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

// ============================================================================
// Credential Requests
// ============================================================================

/// Request to create or replace a credential.
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    /// One of `SECRET`, `MTLS`, `PRIVATE_KEY_JWT`,
    /// `OAUTH2_CLIENT_CREDENTIALS`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub credential_type: Option<String>,

    /// Sensitive payload. Stored as given, never returned.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub credential_details: Option<Value>,
}

impl CredentialRequest {
    /// Read the request from any JSON body.
    ///
    /// Never fails, so that the agent and credential lookups decide the
    /// outcome before the payload does. A body that is not an object
    /// carries neither field.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }
}

impl std::fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("credential_type", &self.credential_type)
            .field("credential_details", &"[redacted]")
            .finish()
    }
}
