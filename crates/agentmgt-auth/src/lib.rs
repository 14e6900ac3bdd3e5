//! Access control for the agent management API.
//!
//! This crate provides:
//! - [`Scope`]: the fixed set of permissions named by resource and action
//! - [`AccessClaims`]: bearer-token claims carrying a space-separated `scope`
//! - HS256/RS256 token encoding and verification built on `jsonwebtoken`
//! - [`AccessGate`]: the single boundary call the API makes per request,
//!   yielding either an authorized [`Principal`] or an [`AuthError`]
//!
//! # Example
//!
//! ```rust
//! use agentmgt_auth::{
//!     encode_hs256, AccessClaims, AccessGate, JwtAccessGate, Scope, ValidationConfig,
//!     VerificationKey,
//! };
//!
//! let secret = b"an-hs256-secret-of-reasonable-length";
//! let claims = AccessClaims::builder()
//!     .subject("svc-billing")
//!     .scopes([Scope::AgentRead])
//!     .expires_in_secs(300)
//!     .build();
//! let token = encode_hs256(&claims, secret).unwrap();
//!
//! let gate = JwtAccessGate::new(
//!     VerificationKey::Hs256(secret.to_vec()),
//!     ValidationConfig::default(),
//! )
//! .unwrap();
//!
//! let header = format!("Bearer {token}");
//! let principal = gate
//!     .authenticate_and_authorize(Some(&header), Scope::AgentRead)
//!     .unwrap();
//! assert_eq!(principal.subject, "svc-billing");
//! assert!(gate
//!     .authenticate_and_authorize(Some(&header), Scope::AgentDelete)
//!     .is_err());
//! ```

mod claims;
mod error;
mod gate;
mod jwt;
mod scope;

pub use claims::{AccessClaims, AccessClaimsBuilder};
pub use error::AuthError;
pub use gate::{bearer_token, AccessGate, BearerPresenceGate, JwtAccessGate, Principal};
pub use jwt::{encode_hs256, encode_rs256, TokenVerifier, ValidationConfig, VerificationKey};
pub use scope::Scope;
