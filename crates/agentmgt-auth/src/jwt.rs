//! Access-token encoding and verification.
//!
//! Tokens are signed either with a shared HS256 secret or an RS256 key pair.
//! A [`TokenVerifier`] accepts only the algorithm its key was built for.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::AccessClaims;
use crate::error::AuthError;

/// Configuration for token validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Leeway in seconds for exp/iat validation (clock skew tolerance).
    pub leeway: u64,
    /// Expected issuer (if set, tokens with different issuer are rejected).
    pub issuer: Option<String>,
    /// Expected audience (if set, tokens without matching audience are rejected).
    pub audience: Option<Vec<String>>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            leeway: 60,
            issuer: None,
            audience: None,
        }
    }
}

impl ValidationConfig {
    /// Set the expected issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    /// Set the expected audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.audience = Some(aud.into_iter().map(Into::into).collect());
        self
    }
}

/// Key material used to verify access tokens.
#[derive(Clone)]
pub enum VerificationKey {
    /// Shared HS256 secret.
    Hs256(Vec<u8>),
    /// PEM-encoded RS256 public key.
    Rs256(Vec<u8>),
}

impl VerificationKey {
    fn algorithm(&self) -> Algorithm {
        match self {
            VerificationKey::Hs256(_) => Algorithm::HS256,
            VerificationKey::Rs256(_) => Algorithm::RS256,
        }
    }

    fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        match self {
            VerificationKey::Hs256(secret) => {
                if secret.is_empty() {
                    return Err(AuthError::InvalidKey("HS256 secret is empty".to_string()));
                }
                Ok(DecodingKey::from_secret(secret))
            }
            VerificationKey::Rs256(pem) => DecodingKey::from_rsa_pem(pem)
                .map_err(|e| AuthError::InvalidKey(format!("Invalid public key: {e}"))),
        }
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationKey::Hs256(_) => f.write_str("VerificationKey::Hs256([redacted])"),
            VerificationKey::Rs256(_) => f.write_str("VerificationKey::Rs256([redacted])"),
        }
    }
}

/// Encode claims into an HS256-signed token.
///
/// # Errors
///
/// Returns `AuthError::InvalidKey` if the secret is empty.
pub fn encode_hs256(claims: &AccessClaims, secret: &[u8]) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidKey("HS256 secret is empty".to_string()));
    }
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Encode claims into an RS256-signed token.
///
/// # Errors
///
/// Returns `AuthError::InvalidKey` if the private key is invalid.
pub fn encode_rs256(claims: &AccessClaims, private_key_pem: &[u8]) -> Result<String, AuthError> {
    let key = EncodingKey::from_rsa_pem(private_key_pem)
        .map_err(|e| AuthError::InvalidKey(format!("Invalid private key: {e}")))?;

    encode(&Header::new(Algorithm::RS256), claims, &key)
        .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Verifies access tokens against one key and one validation policy.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidKey` if the key material cannot be parsed.
    pub fn new(key: &VerificationKey, config: &ValidationConfig) -> Result<Self, AuthError> {
        let algorithm = key.algorithm();
        let decoding_key = key.decoding_key()?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway;
        validation.algorithms = vec![algorithm];

        if let Some(ref iss) = config.issuer {
            validation.set_issuer(&[iss]);
        }

        if let Some(ref aud) = config.audience {
            validation.set_audience(aud);
        } else {
            validation.validate_aud = false;
        }

        Ok(Self {
            key: decoding_key,
            validation,
        })
    }

    /// Decode and validate a token.
    ///
    /// # Errors
    ///
    /// - `AuthError::TokenExpired` - Token has expired
    /// - `AuthError::InvalidSignature` - Signature verification failed
    /// - `AuthError::InvalidAlgorithm` - Token uses another algorithm
    /// - `AuthError::InvalidToken` - Token format is invalid
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}

/// Map jsonwebtoken errors to `AuthError`.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::InvalidAlgorithm,
        ErrorKind::InvalidToken => AuthError::InvalidToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::InvalidToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::InvalidToken("Invalid JSON in claims".to_string()),
        ErrorKind::InvalidIssuer => AuthError::InvalidToken("Unexpected issuer".to_string()),
        ErrorKind::InvalidAudience => AuthError::InvalidToken("Unexpected audience".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        _ => AuthError::InvalidToken(format!("Token validation failed: {err}")),
    }
}
