//! Permission scopes.

use serde::{Deserialize, Serialize};

/// A named permission required to perform one operation on agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// List and read agents and credentials.
    #[serde(rename = "internal_org_agent_mgt_read")]
    AgentRead,
    /// Register agents.
    #[serde(rename = "internal_org_agent_mgt_create")]
    AgentCreate,
    /// Modify agents and manage their credentials.
    #[serde(rename = "internal_org_agent_mgt_update")]
    AgentUpdate,
    /// Delete agents.
    #[serde(rename = "internal_org_agent_mgt_delete")]
    AgentDelete,
}

impl Scope {
    /// Every defined scope.
    pub const ALL: [Scope; 4] = [
        Scope::AgentRead,
        Scope::AgentCreate,
        Scope::AgentUpdate,
        Scope::AgentDelete,
    ];

    /// Wire name as it appears in the token `scope` claim.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::AgentRead => "internal_org_agent_mgt_read",
            Scope::AgentCreate => "internal_org_agent_mgt_create",
            Scope::AgentUpdate => "internal_org_agent_mgt_update",
            Scope::AgentDelete => "internal_org_agent_mgt_delete",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| format!("Unknown scope: {s}"))
    }
}
