//! The access control gate.
//!
//! The API makes exactly one gate call per request, before touching any
//! store. The gate resolves the caller from the raw `Authorization` header
//! and checks the one scope the operation requires.

use crate::error::AuthError;
use crate::jwt::{TokenVerifier, ValidationConfig, VerificationKey};
use crate::scope::Scope;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Token subject.
    pub subject: String,
    /// Scopes granted to the caller.
    pub scopes: Vec<Scope>,
}

impl Principal {
    /// Check if the principal holds `scope`.
    #[must_use]
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }
}

/// Authenticates the caller and authorizes one required scope.
pub trait AccessGate: Send + Sync {
    /// Resolve the caller from the raw `Authorization` header value and check
    /// that it holds `required`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the caller cannot be authenticated or lacks the
    /// required scope.
    fn authenticate_and_authorize(
        &self,
        authorization: Option<&str>,
        required: Scope,
    ) -> Result<Principal, AuthError>;
}

/// Extract the token from a `Bearer` Authorization header value.
///
/// # Errors
///
/// - `AuthError::MissingToken` - no header
/// - `AuthError::InvalidScheme` - not a Bearer header
/// - `AuthError::EmptyToken` - Bearer with nothing after it
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization.ok_or(AuthError::MissingToken)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidScheme)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }

    Ok(token)
}

/// Gate that validates signed access tokens and their `scope` claim.
#[derive(Clone)]
pub struct JwtAccessGate {
    verifier: TokenVerifier,
}

impl JwtAccessGate {
    /// Build a gate from key material and a validation policy.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidKey` if the key material cannot be parsed.
    pub fn new(key: VerificationKey, config: ValidationConfig) -> Result<Self, AuthError> {
        Ok(Self {
            verifier: TokenVerifier::new(&key, &config)?,
        })
    }
}

impl AccessGate for JwtAccessGate {
    fn authenticate_and_authorize(
        &self,
        authorization: Option<&str>,
        required: Scope,
    ) -> Result<Principal, AuthError> {
        let token = bearer_token(authorization)?;
        let claims = self.verifier.verify(token)?;

        if !claims.has_scope(required) {
            tracing::warn!(
                subject = %claims.sub,
                required = %required,
                "Token lacks required scope"
            );
            return Err(AuthError::InsufficientScope(required));
        }

        Ok(Principal {
            scopes: claims.scopes(),
            subject: claims.sub,
        })
    }
}

/// Development gate that accepts any non-empty bearer token.
///
/// Every caller is granted every scope. Only suitable for local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerPresenceGate;

impl AccessGate for BearerPresenceGate {
    fn authenticate_and_authorize(
        &self,
        authorization: Option<&str>,
        _required: Scope,
    ) -> Result<Principal, AuthError> {
        bearer_token(authorization)?;

        Ok(Principal {
            subject: "anonymous".to_string(),
            scopes: Scope::ALL.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::AccessClaims;
    use crate::jwt::encode_hs256;

    const SECRET: &[u8] = b"gate-test-secret-value";

    fn gate() -> JwtAccessGate {
        JwtAccessGate::new(
            VerificationKey::Hs256(SECRET.to_vec()),
            ValidationConfig::default(),
        )
        .unwrap()
    }

    fn header_with(scopes: &[Scope]) -> String {
        let claims = AccessClaims::builder()
            .subject("svc-test")
            .scopes(scopes.iter().copied())
            .build();
        format!("Bearer {}", encode_hs256(&claims, SECRET).unwrap())
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(None), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::InvalidScheme));
        assert_eq!(bearer_token(Some("Bearer ")), Err(AuthError::EmptyToken));
        assert_eq!(bearer_token(Some("Bearer    ")), Err(AuthError::EmptyToken));
    }

    #[test]
    fn test_jwt_gate_grants_with_scope() {
        let header = header_with(&[Scope::AgentRead, Scope::AgentUpdate]);
        let principal = gate()
            .authenticate_and_authorize(Some(&header), Scope::AgentUpdate)
            .unwrap();

        assert_eq!(principal.subject, "svc-test");
        assert!(principal.has_scope(Scope::AgentRead));
        assert!(!principal.has_scope(Scope::AgentDelete));
    }

    #[test]
    fn test_jwt_gate_rejects_missing_scope() {
        let header = header_with(&[Scope::AgentRead]);
        let result = gate().authenticate_and_authorize(Some(&header), Scope::AgentDelete);

        assert_eq!(result, Err(AuthError::InsufficientScope(Scope::AgentDelete)));
    }

    #[test]
    fn test_jwt_gate_rejects_missing_header() {
        let result = gate().authenticate_and_authorize(None, Scope::AgentRead);
        assert_eq!(result, Err(AuthError::MissingToken));
    }

    #[test]
    fn test_jwt_gate_rejects_invalid_token() {
        let result = gate().authenticate_and_authorize(Some("Bearer nonsense"), Scope::AgentRead);
        assert!(result.is_err());
    }

    #[test]
    fn test_presence_gate_accepts_any_bearer() {
        let principal = BearerPresenceGate
            .authenticate_and_authorize(Some("Bearer anything"), Scope::AgentDelete)
            .unwrap();
        assert_eq!(principal.scopes.len(), Scope::ALL.len());
    }

    #[test]
    fn test_presence_gate_rejects_missing_bearer() {
        assert_eq!(
            BearerPresenceGate.authenticate_and_authorize(None, Scope::AgentRead),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            BearerPresenceGate.authenticate_and_authorize(Some("Token x"), Scope::AgentRead),
            Err(AuthError::InvalidScheme)
        );
    }
}
