//! Strongly Typed Identifiers
//!
//! Every identifier issued by the API is a random UUID v4 wrapped in a
//! newtype, so an agent id can never be passed where a credential id is
//! expected.
//!
//! # Example
//!
//! ```
//! use agentmgt_core::{AgentId, CredentialId};
//!
//! let agent = AgentId::new();
//!
//! fn requires_agent(id: AgentId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_agent(agent);
//! // requires_agent(CredentialId::new()); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier of a registered agent.
    ///
    /// Issued once at creation and never reassigned, even after the agent
    /// is deleted.
    ///
    /// # Example
    ///
    /// ```
    /// use agentmgt_core::AgentId;
    ///
    /// let id: AgentId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
    /// assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    /// ```
    AgentId
);

define_id!(
    /// Identifier of a credential bound to an agent.
    CredentialId
);

define_id!(
    /// Correlation identifier issued for every failed request.
    ///
    /// A fresh value is generated per failure; it is never derived from
    /// request input.
    TraceId
);
