//! Agent record.
//!
//! A registered software/service identity. `id` and `created_at` are fixed at
//! creation; every successful mutation refreshes `updated_at`. Attributes a
//! client adds beyond the known ones are kept in `extra` and serialized
//! alongside them.

use agentmgt_core::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A registered agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier, immutable.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: AgentId,

    /// Display name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Version string of the agent software.
    pub version: String,

    /// Endpoint URL, if published.
    pub url: Option<String>,

    /// Owning person or team, if known.
    pub owner: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,

    /// Client-supplied attributes with no dedicated field.
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub extra: Map<String, Value>,
}

impl Agent {
    /// Build a new agent stamped with `now` for both timestamps.
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        version: String,
        url: Option<String>,
        owner: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AgentId::new(),
            name,
            description,
            version,
            url,
            owner,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Agent {
        Agent::new(
            "billing-bot".to_string(),
            "handles billing".to_string(),
            "1.0".to_string(),
            None,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_stamps_equal_timestamps() {
        let agent = sample();
        assert_eq!(agent.created_at, agent.updated_at);
    }

    #[test]
    fn test_serializes_camel_case_with_null_optionals() {
        let agent = sample();
        let json = serde_json::to_value(&agent).unwrap();

        assert_eq!(json["id"], agent.id.to_string());
        assert_eq!(json["name"], "billing-bot");
        assert!(json["url"].is_null());
        assert!(json["owner"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_extra_attributes_sit_beside_known_fields() {
        let mut agent = sample();
        agent
            .extra
            .insert("color".to_string(), Value::String("blue".to_string()));

        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["color"], "blue");
        assert_eq!(json["name"], "billing-bot");

        let back: Agent = serde_json::from_value(json).unwrap();
        assert_eq!(back, agent);
    }
}
