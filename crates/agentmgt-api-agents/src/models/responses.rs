//! Response DTOs for the agent management API.
//!
//! Agents are returned as stored. Credentials are only ever returned through
//! [`CredentialView`], which exposes the type and nothing of the details.

use agentmgt_core::CredentialId;
use agentmgt_store::{Credential, CredentialType};
use serde::{Deserialize, Serialize};

/// Masked representation of a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CredentialView {
    /// Credential identifier.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub credential_id: CredentialId,

    /// Details with every sensitive field removed.
    pub credential_details: MaskedCredentialDetails,
}

/// The only part of the credential details that is ever echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MaskedCredentialDetails {
    /// Credential type.
    pub credential_type: CredentialType,
}

impl From<&Credential> for CredentialView {
    fn from(credential: &Credential) -> Self {
        Self {
            credential_id: credential.credential_id,
            credential_details: MaskedCredentialDetails {
                credential_type: credential.credential_type,
            },
        }
    }
}

impl From<Credential> for CredentialView {
    fn from(credential: Credential) -> Self {
        Self::from(&credential)
    }
}
