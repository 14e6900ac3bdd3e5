//! Access-token claims.
//!
//! Standard RFC 7519 claims plus the RFC 9068 style `scope` claim, a
//! space-separated list of granted scopes.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scope::Scope;

/// Claims carried by an access token.
///
/// # Example
///
/// ```rust
/// use agentmgt_auth::{AccessClaims, Scope};
///
/// let claims = AccessClaims::builder()
///     .subject("svc-billing")
///     .scopes([Scope::AgentRead, Scope::AgentUpdate])
///     .expires_in_secs(3600)
///     .build();
///
/// assert!(claims.has_scope(Scope::AgentRead));
/// assert!(!claims.has_scope(Scope::AgentDelete));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject - the calling service or user.
    pub sub: String,

    /// Issuer - who created the token.
    pub iss: String,

    /// Audience - intended recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aud: Vec<String>,

    /// Expiration time as Unix timestamp.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,

    /// JWT ID - unique identifier for this token.
    pub jti: String,

    /// Granted scopes, space-separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl AccessClaims {
    /// Create a new builder for constructing claims.
    #[must_use]
    pub fn builder() -> AccessClaimsBuilder {
        AccessClaimsBuilder::default()
    }

    /// Check if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Granted scopes. Unknown scope names are ignored.
    #[must_use]
    pub fn scopes(&self) -> Vec<Scope> {
        self.scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    /// Check if the claims grant `scope`.
    #[must_use]
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|s| s.split_whitespace().any(|granted| granted == scope.as_str()))
    }
}

/// Builder for [`AccessClaims`].
#[derive(Debug, Default)]
pub struct AccessClaimsBuilder {
    sub: Option<String>,
    iss: Option<String>,
    aud: Vec<String>,
    exp: Option<i64>,
    iat: Option<i64>,
    jti: Option<String>,
    scope: Option<String>,
}

impl AccessClaimsBuilder {
    /// Set the subject.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.aud = aud.into_iter().map(Into::into).collect();
        self
    }

    /// Set expiration time as Unix timestamp.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set expiration time as seconds from now.
    #[must_use]
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.exp = Some(Utc::now().timestamp() + secs);
        self
    }

    /// Set the issued at time.
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set the JWT ID.
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Grant the given scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        let joined = scopes
            .into_iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.scope = Some(joined);
        self
    }

    /// Set the raw `scope` claim.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Build the claims.
    #[must_use]
    pub fn build(self) -> AccessClaims {
        let now = Utc::now().timestamp();

        AccessClaims {
            sub: self.sub.unwrap_or_default(),
            iss: self.iss.unwrap_or_else(|| "agentmgt".to_string()),
            aud: self.aud,
            exp: self.exp.unwrap_or(now + 3600), // Default: 1 hour
            iat: self.iat.unwrap_or(now),
            jti: self.jti.unwrap_or_else(|| Uuid::new_v4().to_string()),
            scope: self.scope,
        }
    }
}
