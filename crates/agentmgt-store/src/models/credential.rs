//! Credential record.
//!
//! Credentials carry sensitive material in `credential_details`. The payload
//! is write-only from the caller's perspective: it is stored, never echoed,
//! and redacted from `Debug` output so it cannot leak into logs.

use agentmgt_core::{AgentId, AgentOwned, CredentialId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported credential kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    /// Shared secret.
    Secret,
    /// Mutual TLS client certificate.
    Mtls,
    /// Private key JWT client assertion.
    PrivateKeyJwt,
    /// OAuth2 client credentials grant.
    #[serde(rename = "OAUTH2_CLIENT_CREDENTIALS")]
    Oauth2ClientCredentials,
}

impl CredentialType {
    /// Every supported credential type.
    pub const ALL: [CredentialType; 4] = [
        CredentialType::Secret,
        CredentialType::Mtls,
        CredentialType::PrivateKeyJwt,
        CredentialType::Oauth2ClientCredentials,
    ];

    /// Wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::Secret => "SECRET",
            CredentialType::Mtls => "MTLS",
            CredentialType::PrivateKeyJwt => "PRIVATE_KEY_JWT",
            CredentialType::Oauth2ClientCredentials => "OAUTH2_CLIENT_CREDENTIALS",
        }
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CredentialType {
    type Err = String;

    /// Wire names are matched exactly; `secret` is not `SECRET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CredentialType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid credential type: {s}"))
    }
}

/// A credential bound to exactly one agent.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Unique identifier, immutable.
    pub credential_id: CredentialId,

    /// Owning agent, immutable.
    pub agent_id: AgentId,

    /// Credential kind, write-once.
    pub credential_type: CredentialType,

    /// Type-specific sensitive payload.
    pub credential_details: Value,
}

impl Credential {
    /// Build a new credential with a freshly generated id.
    #[must_use]
    pub fn new(agent_id: AgentId, credential_type: CredentialType, credential_details: Value) -> Self {
        Self {
            credential_id: CredentialId::new(),
            agent_id,
            credential_type,
            credential_details,
        }
    }
}

impl AgentOwned for Credential {
    fn agent_id(&self) -> AgentId {
        self.agent_id
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("credential_id", &self.credential_id)
            .field("agent_id", &self.agent_id)
            .field("credential_type", &self.credential_type)
            .field("credential_details", &"[redacted]")
            .finish()
    }
}
