//! Error types for authentication and authorization.

use thiserror::Error;

use crate::scope::Scope;

/// Authentication error types.
///
/// Every variant is surfaced to callers as an authentication failure; the
/// variants exist so logs can say why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No Authorization header was supplied.
    #[error("Missing Authorization header")]
    MissingToken,

    /// The Authorization header does not use the Bearer scheme.
    #[error("Invalid Authorization header format")]
    InvalidScheme,

    /// The bearer token is empty.
    #[error("Empty bearer token")]
    EmptyToken,

    /// Token has expired (exp claim is in the past).
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature is invalid.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token format is malformed or invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token uses an algorithm other than the configured one.
    #[error("Unsupported token algorithm")]
    InvalidAlgorithm,

    /// Required claim is missing from token.
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Key material is invalid or malformed.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The token is valid but does not grant the required scope.
    #[error("Token does not grant scope '{0}'")]
    InsufficientScope(Scope),
}
